//! # Error Module
//!
//! Error types for the photo canonicalizer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-file failures are values** - a bad file ends up in the run summary,
//!   only root-level problems abort a run

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DedupError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while walking the tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur during image hashing
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while handling a single file.
///
/// These never abort a run; the pipeline records them in its summary.
#[derive(Error, Debug)]
pub enum FileError {
    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: FileAction,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File has no usable name: {path}")]
    InvalidName { path: PathBuf },
}

impl FileError {
    pub(crate) fn io(action: FileAction, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Filesystem operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Inspect,
    Rename,
    Move,
    Delete,
    CreateDirectory,
}

impl std::fmt::Display for FileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileAction::Inspect => write!(f, "inspect"),
            FileAction::Rename => write!(f, "rename"),
            FileAction::Move => write!(f, "move"),
            FileAction::Delete => write!(f, "delete"),
            FileAction::CreateDirectory => write!(f, "create directory"),
        }
    }
}

/// Errors that occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(String),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DedupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::DirectoryNotFound {
            path: PathBuf::from("/photos/vacation"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/vacation"));
    }

    #[test]
    fn hash_error_includes_path() {
        let error = HashError::DecodeError {
            path: PathBuf::from("/photos/broken.jpg"),
            reason: "invalid JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/broken.jpg"));
        assert!(message.contains("invalid JPEG"));
    }

    #[test]
    fn file_error_names_the_action() {
        let error = FileError::io(
            FileAction::Rename,
            "/photos/a.jpg",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = error.to_string();
        assert!(message.starts_with("Failed to rename /photos/a.jpg"));
    }

    #[test]
    fn hash_failure_passes_through_file_error() {
        let error: FileError = HashError::EmptyImage {
            path: PathBuf::from("/photos/empty.png"),
        }
        .into();
        assert_eq!(error.to_string(), "Image is empty or corrupted: /photos/empty.png");
    }
}
