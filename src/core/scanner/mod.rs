//! # Scanner Module
//!
//! Discovers directories and image files under the root.
//!
//! ## Accepted Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - GIF (.gif)
//!
//! Extensions are matched case-sensitively unless configured otherwise.
//!
//! ## Example
//! ```rust,ignore
//! use photo_canon::core::scanner::{ScanConfig, SkipSet, TreeWalker};
//!
//! let walker = TreeWalker::new(ScanConfig::default(), SkipSet::new());
//! for dir in walker.directories(&root)?.directories {
//!     let listing = walker.list_files(&dir)?;
//! }
//! ```

mod filter;
mod skip;
mod walker;

pub use filter::{ImageFilter, DEFAULT_EXTENSIONS};
pub use skip::SkipSet;
pub use walker::{DirectoryListing, DirectoryWalk, ScanConfig, TreeWalker};

use crate::core::reporter::format_size;
use crate::error::{FileAction, FileError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// An image file as seen when it was inspected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path to the file
    pub path: PathBuf,
    /// Extension including the leading dot, e.g. `.jpg`; empty if none
    pub extension: String,
    /// File size in bytes
    pub size_bytes: u64,
}

impl FileEntry {
    /// Read metadata for `path`.
    ///
    /// Names that are not valid UTF-8 are rejected, since canonical names
    /// and reports are built from them.
    pub fn inspect(path: &Path) -> Result<Self, FileError> {
        let metadata =
            fs::metadata(path).map_err(|e| FileError::io(FileAction::Inspect, path, e))?;

        if path.file_name().and_then(|n| n.to_str()).is_none() {
            return Err(FileError::InvalidName {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            extension,
            size_bytes: metadata.len(),
        })
    }

    /// File name including extension
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// File name up to its first dot, so `beach.2019.png` gives `beach`
    pub fn stem(&self) -> &str {
        let name = self.file_name();
        name.split_once('.').map_or(name, |(stem, _)| stem)
    }

    /// Directory holding the file
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Human readable `"<size>, <ext>"`, e.g. `"1.5KiB, jpg"`
    pub fn description(&self) -> String {
        format!(
            "{}, {}",
            format_size(self.size_bytes),
            self.extension.trim_start_matches('.')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn inspect_reads_size_and_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sunset.jpg");
        fs::write(&path, vec![0u8; 1536]).unwrap();

        let entry = FileEntry::inspect(&path).unwrap();

        assert_eq!(entry.extension, ".jpg");
        assert_eq!(entry.size_bytes, 1536);
        assert_eq!(entry.file_name(), "sunset.jpg");
        assert_eq!(entry.stem(), "sunset");
        assert_eq!(entry.description(), "1.5KiB, jpg");
    }

    #[test]
    fn inspect_missing_file_fails() {
        let result = FileEntry::inspect(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(
            result,
            Err(FileError::Io {
                action: FileAction::Inspect,
                ..
            })
        ));
    }

    #[test]
    fn stem_stops_at_first_dot() {
        let entry = FileEntry {
            path: PathBuf::from("/photos/beach.2019.png"),
            extension: ".png".to_string(),
            size_bytes: 0,
        };
        assert_eq!(entry.stem(), "beach");
        assert_eq!(entry.directory(), Path::new("/photos"));
    }
}
