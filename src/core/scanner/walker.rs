//! Directory walking implementation using walkdir.
//!
//! The walker works in two steps so the passes can move files around
//! safely: the set of directories is captured first (pre-order, sorted by
//! name), then each directory's files are listed as a snapshot right before
//! that directory is processed. Directories created during a pass, such as
//! organize buckets, are therefore not revisited by the same pass.

use super::filter::{is_hidden, ImageFilter};
use super::{FileEntry, SkipSet};
use crate::error::{FileError, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Match extensions regardless of case
    pub case_insensitive_extensions: bool,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

/// Directories found under a root
#[derive(Debug, Default)]
pub struct DirectoryWalk {
    /// Directories in depth-first pre-order, root first
    pub directories: Vec<PathBuf>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Snapshot of one directory's accepted image files
#[derive(Debug, Default)]
pub struct DirectoryListing {
    /// Files sorted by name
    pub files: Vec<FileEntry>,
    /// Files that could not be inspected (non-fatal)
    pub errors: Vec<FileError>,
}

/// Walks a tree while honoring the skip set
pub struct TreeWalker {
    config: ScanConfig,
    filter: ImageFilter,
    skip: SkipSet,
}

impl TreeWalker {
    /// Create a new walker with the given configuration
    pub fn new(config: ScanConfig, skip: SkipSet) -> Self {
        let mut filter = ImageFilter::new()
            .with_hidden(config.include_hidden)
            .with_case_insensitive(config.case_insensitive_extensions);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self {
            config,
            filter,
            skip,
        }
    }

    pub fn skip_set(&self) -> &SkipSet {
        &self.skip
    }

    /// Collect every directory under `root` that is not skipped
    pub fn directories(&self, root: &Path) -> Result<DirectoryWalk, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut walk = DirectoryWalk::default();
        let include_hidden = self.config.include_hidden;

        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return false;
                }
                if self.skip.contains(entry.path()) {
                    return false;
                }
                entry.depth() == 0 || include_hidden || !is_hidden(entry.path())
            });

        for entry_result in walker {
            match entry_result {
                Ok(entry) => walk.directories.push(entry.into_path()),
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path }
                    } else {
                        ScanError::ReadDirectory {
                            path,
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    walk.errors.push(error);
                }
            }
        }

        Ok(walk)
    }

    /// List the accepted image files directly inside `dir`
    pub fn list_files(&self, dir: &Path) -> Result<DirectoryListing, ScanError> {
        let entries = fs::read_dir(dir).map_err(|e| ScanError::ReadDirectory {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut listing = DirectoryListing::default();

        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    listing.errors.push(FileError::io(
                        crate::error::FileAction::Inspect,
                        dir,
                        e,
                    ));
                    continue;
                }
            };

            if !path.is_file() || !self.filter.should_include(&path) {
                continue;
            }

            match FileEntry::inspect(&path) {
                Ok(file) => listing.files.push(file),
                Err(e) => listing.errors.push(e),
            }
        }

        listing.files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_photo(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        path
    }

    fn walker() -> TreeWalker {
        TreeWalker::new(ScanConfig::default(), SkipSet::new())
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();

        let listing = walker().list_files(temp_dir.path()).unwrap();

        assert!(listing.files.is_empty());
        assert!(listing.errors.is_empty());
    }

    #[test]
    fn listing_is_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(temp_dir.path(), "b.png");
        create_test_photo(temp_dir.path(), "a.jpg");
        create_test_photo(temp_dir.path(), "notes.txt");
        create_test_photo(temp_dir.path(), "upper.JPG");
        fs::create_dir(temp_dir.path().join("sub.jpg")).unwrap();

        let listing = walker().list_files(temp_dir.path()).unwrap();
        let names: Vec<_> = listing.files.iter().map(|f| f.file_name()).collect();

        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn listing_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("nested");
        fs::create_dir(&subdir).unwrap();
        create_test_photo(&subdir, "deep.jpg");

        let listing = walker().list_files(temp_dir.path()).unwrap();
        assert!(listing.files.is_empty());
    }

    #[test]
    fn directories_are_preorder_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::create_dir_all(root.join("a/inner")).unwrap();

        let walk = walker().directories(root).unwrap();

        assert_eq!(
            walk.directories,
            vec![
                root.to_path_buf(),
                root.join("a"),
                root.join("a/inner"),
                root.join("b"),
            ]
        );
    }

    #[test]
    fn skipped_directories_and_their_children_are_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("keep")).unwrap();
        fs::create_dir_all(root.join("1/below")).unwrap();

        let skip = SkipSet::from_names(root, ["1"]);
        let walk = TreeWalker::new(ScanConfig::default(), skip)
            .directories(root)
            .unwrap();

        assert_eq!(walk.directories, vec![root.to_path_buf(), root.join("keep")]);
    }

    #[test]
    fn hidden_directories_are_skipped_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".thumbnails")).unwrap();

        let walk = walker().directories(root).unwrap();
        assert_eq!(walk.directories, vec![root.to_path_buf()]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let result = walker().directories(Path::new("/nonexistent/path/12345"));
        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }
}
