//! # Identity Module
//!
//! Gives every image a canonical name derived from its content:
//! `<fingerprint hex><extension>`, e.g. `ffd8c0c0e0f0f8fc.jpg`.
//!
//! ## Resolution Rules
//! 1. Fingerprint the file and build its canonical name
//! 2. If the file is not yet named canonically and a sibling already holds
//!    that name, the file is a duplicate and goes to quarantine
//! 3. Otherwise rename it (if needed) and claim the name in the run's
//!    [`NameRegistry`]; a name claimed earlier anywhere in the tree sends
//!    the file to quarantine as well
//!
//! Step 2 leaves the registry alone: the sibling that owns the name claims
//! it when its own turn comes.

use crate::core::hasher::{Fingerprint, HashAlgorithm};
use crate::core::quarantine::{DuplicateSink, SinkOutcome};
use crate::core::registry::NameRegistry;
use crate::core::scanner::FileEntry;
use crate::error::{FileAction, FileError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Canonical file name for a fingerprint and extension (with leading dot)
pub fn canonical_name(fingerprint: &Fingerprint, extension: &str) -> String {
    format!("{}{}", fingerprint.to_hex(), extension)
}

/// Result of resolving one file's identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveOutcome {
    /// The file was renamed to its canonical name and owns it
    Renamed { from: PathBuf, to: PathBuf },
    /// The file already carried its canonical name and owns it
    Unchanged { path: PathBuf },
    /// The canonical name belongs to another file; this one was sunk
    MarkedDuplicate {
        path: PathBuf,
        canonical: String,
        sink: SinkOutcome,
    },
}

/// Decides rename vs. duplicate for each file of the rename pass
pub struct IdentityResolver<'a> {
    hasher: &'a dyn HashAlgorithm,
    registry: &'a NameRegistry,
    sink: &'a DuplicateSink,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(
        hasher: &'a dyn HashAlgorithm,
        registry: &'a NameRegistry,
        sink: &'a DuplicateSink,
    ) -> Self {
        Self {
            hasher,
            registry,
            sink,
        }
    }

    /// Fingerprint a file; pure, safe to call from several threads
    pub fn fingerprint(&self, file: &FileEntry) -> Result<Fingerprint, FileError> {
        Ok(self.hasher.hash_file(&file.path)?)
    }

    /// Fingerprint and resolve in one step
    pub fn resolve(&self, file: &FileEntry) -> Result<ResolveOutcome, FileError> {
        let fingerprint = self.fingerprint(file)?;
        self.apply(file, &fingerprint)
    }

    /// Resolve a file whose fingerprint is already known
    pub fn apply(
        &self,
        file: &FileEntry,
        fingerprint: &Fingerprint,
    ) -> Result<ResolveOutcome, FileError> {
        let canonical = canonical_name(fingerprint, &file.extension);
        let mut current = file.path.clone();
        let mut renamed_from = None;

        if file.file_name() != canonical {
            let target = file.directory().join(&canonical);

            if target.exists() {
                debug!(
                    "{} collides with existing {}",
                    file.path.display(),
                    target.display()
                );
                let sink = self.sink.sink(&current, &canonical)?;
                return Ok(ResolveOutcome::MarkedDuplicate {
                    path: file.path.clone(),
                    canonical,
                    sink,
                });
            }

            fs::rename(&current, &target)
                .map_err(|e| FileError::io(FileAction::Rename, &current, e))?;
            info!(
                "{} {} -> {}",
                file.directory().display(),
                file.file_name(),
                canonical
            );
            renamed_from = Some(current);
            current = target;
        }

        if !self.registry.claim(&canonical) {
            debug!("{} already claimed earlier in this run", canonical);
            let sink = self.sink.sink(&current, &canonical)?;
            return Ok(ResolveOutcome::MarkedDuplicate {
                path: file.path.clone(),
                canonical,
                sink,
            });
        }

        Ok(match renamed_from {
            Some(from) => ResolveOutcome::Renamed { from, to: current },
            None => ResolveOutcome::Unchanged { path: current },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::test_support::ContentHasher;
    use tempfile::TempDir;

    struct Fixture {
        temp_dir: TempDir,
        registry: NameRegistry,
        sink: DuplicateSink,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let sink = DuplicateSink::new(temp_dir.path().join("quarantine"));
            fs::create_dir(temp_dir.path().join("photos")).unwrap();
            Self {
                temp_dir,
                registry: NameRegistry::new(),
                sink,
            }
        }

        fn photo(&self, relative: &str, content: &[u8]) -> FileEntry {
            let path = self.temp_dir.path().join("photos").join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            FileEntry::inspect(&path).unwrap()
        }

        fn photos_dir(&self) -> PathBuf {
            self.temp_dir.path().join("photos")
        }

        fn quarantine(&self) -> PathBuf {
            self.temp_dir.path().join("quarantine")
        }

        fn resolve(&self, file: &FileEntry) -> ResolveOutcome {
            IdentityResolver::new(&ContentHasher, &self.registry, &self.sink)
                .resolve(file)
                .unwrap()
        }
    }

    #[test]
    fn canonical_name_joins_hex_and_extension() {
        let fingerprint = Fingerprint::new(vec![0xAB, 0x01]);
        assert_eq!(canonical_name(&fingerprint, ".png"), "ab01.png");
    }

    #[test]
    fn unique_file_is_renamed_and_claimed() {
        let fixture = Fixture::new();
        let file = fixture.photo("img1.jpg", &[0xAB]);

        let outcome = fixture.resolve(&file);

        assert_eq!(
            outcome,
            ResolveOutcome::Renamed {
                from: fixture.photos_dir().join("img1.jpg"),
                to: fixture.photos_dir().join("ab.jpg"),
            }
        );
        assert!(fixture.registry.contains("ab.jpg"));
        assert!(!fixture.quarantine().exists());
    }

    #[test]
    fn canonically_named_file_is_unchanged() {
        let fixture = Fixture::new();
        let file = fixture.photo("ab.jpg", &[0xAB]);

        let outcome = fixture.resolve(&file);

        assert_eq!(
            outcome,
            ResolveOutcome::Unchanged {
                path: fixture.photos_dir().join("ab.jpg")
            }
        );
    }

    #[test]
    fn sibling_holding_the_name_sends_file_to_quarantine() {
        let fixture = Fixture::new();
        let copy = fixture.photo("img1_copy.jpg", &[0xAB]);
        fixture.photo("ab.jpg", &[0xAB]);

        let outcome = fixture.resolve(&copy);

        assert!(matches!(
            outcome,
            ResolveOutcome::MarkedDuplicate {
                sink: SinkOutcome::Quarantined { .. },
                ..
            }
        ));
        assert!(fixture.quarantine().join("ab.jpg").exists());
        assert!(fixture.photos_dir().join("ab.jpg").exists());
        // The sibling claims the name on its own visit
        assert!(!fixture.registry.contains("ab.jpg"));
    }

    #[test]
    fn registered_name_in_another_directory_is_a_duplicate() {
        let fixture = Fixture::new();
        let first = fixture.photo("a/ab.jpg", &[0xAB]);
        let second = fixture.photo("b/ab.jpg", &[0xAB]);

        fixture.resolve(&first);
        let outcome = fixture.resolve(&second);

        assert!(matches!(outcome, ResolveOutcome::MarkedDuplicate { .. }));
        assert!(fixture.photos_dir().join("a/ab.jpg").exists());
        assert!(!fixture.photos_dir().join("b/ab.jpg").exists());
        assert!(fixture.quarantine().join("ab.jpg").exists());
    }

    #[test]
    fn renamed_file_with_claimed_name_is_sunk_from_new_location() {
        let fixture = Fixture::new();
        let first = fixture.photo("a/one.jpg", &[0xCD]);
        let second = fixture.photo("b/two.jpg", &[0xCD]);

        fixture.resolve(&first);
        let outcome = fixture.resolve(&second);

        assert!(matches!(outcome, ResolveOutcome::MarkedDuplicate { .. }));
        assert!(!fixture.photos_dir().join("b/two.jpg").exists());
        assert!(!fixture.photos_dir().join("b/cd.jpg").exists());
        assert!(fixture.quarantine().join("cd.jpg").exists());
    }

    #[test]
    fn third_copy_is_deleted() {
        let fixture = Fixture::new();
        let files = [
            fixture.photo("img1.jpg", &[0xEF]),
            fixture.photo("img1_copy.jpg", &[0xEF]),
            fixture.photo("img1_copy2.jpg", &[0xEF]),
        ];

        let outcomes: Vec<_> = files.iter().map(|f| fixture.resolve(f)).collect();

        assert!(matches!(outcomes[0], ResolveOutcome::Renamed { .. }));
        assert!(matches!(
            outcomes[1],
            ResolveOutcome::MarkedDuplicate {
                sink: SinkOutcome::Quarantined { .. },
                ..
            }
        ));
        assert!(matches!(
            outcomes[2],
            ResolveOutcome::MarkedDuplicate {
                sink: SinkOutcome::Deleted { .. },
                ..
            }
        ));
        assert_eq!(fs::read_dir(fixture.quarantine()).unwrap().count(), 1);
        assert_eq!(fs::read_dir(fixture.photos_dir()).unwrap().count(), 1);
    }

    #[test]
    fn unreadable_file_is_a_hash_error() {
        let fixture = Fixture::new();
        let file = fixture.photo("gone.jpg", &[0x01]);
        fs::remove_file(&file.path).unwrap();

        let result = IdentityResolver::new(&ContentHasher, &fixture.registry, &fixture.sink)
            .resolve(&file);

        assert!(matches!(result, Err(FileError::Hash(_))));
        assert!(fixture.registry.is_empty());
    }
}
