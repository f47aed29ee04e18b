//! Moves files into target directories.

use super::types::RelocateOutcome;
use crate::core::hasher::HashAlgorithm;
use crate::core::identity::canonical_name;
use crate::core::quarantine::DuplicateSink;
use crate::core::scanner::FileEntry;
use crate::core::transfer::{ensure_directory, move_file};
use crate::error::FileError;
use std::path::Path;
use tracing::{debug, info};

/// Relocates files, routing name collisions to the duplicate sink
///
/// Calls must not overlap for the same target directory; the pipeline
/// applies each pass sequentially in listing order.
pub struct Relocator<'a> {
    hasher: &'a dyn HashAlgorithm,
    sink: &'a DuplicateSink,
}

impl<'a> Relocator<'a> {
    pub fn new(hasher: &'a dyn HashAlgorithm, sink: &'a DuplicateSink) -> Self {
        Self { hasher, sink }
    }

    /// Move `file` into `target_dir`, keeping its name
    pub fn relocate(
        &self,
        file: &FileEntry,
        target_dir: &Path,
    ) -> Result<RelocateOutcome, FileError> {
        let destination = target_dir.join(file.file_name());

        if destination == file.path {
            return Ok(RelocateOutcome::AlreadyInPlace {
                path: file.path.clone(),
            });
        }

        if destination.exists() {
            debug!(
                "{} already occupied, routing {} to the duplicate sink",
                destination.display(),
                file.path.display()
            );
            let fingerprint = self.hasher.hash_file(&file.path)?;
            let canonical = canonical_name(&fingerprint, &file.extension);
            let sink = self.sink.sink(&file.path, &canonical)?;
            return Ok(RelocateOutcome::RoutedToDuplicateSink {
                path: file.path.clone(),
                canonical,
                sink,
            });
        }

        ensure_directory(target_dir)?;
        move_file(&file.path, &destination)?;
        info!("Moving {} -> {}", file.file_name(), destination.display());

        Ok(RelocateOutcome::Moved {
            from: file.path.clone(),
            to: destination,
        })
    }
}
