//! Moving files between directories.
//!
//! `fs::rename` fails across filesystems (the quarantine directory may live
//! on another volume), so moves fall back to copy, size check, delete.

use crate::error::{FileAction, FileError};
use std::fs;
use std::io;
use std::path::Path;

/// Move `source` to `destination`, which must not exist yet
pub fn move_file(source: &Path, destination: &Path) -> Result<(), FileError> {
    fs::rename(source, destination)
        .or_else(|_| copy_then_delete(source, destination))
        .map_err(|e| FileError::io(FileAction::Move, source, e))
}

fn copy_then_delete(source: &Path, destination: &Path) -> io::Result<()> {
    let source_size = fs::metadata(source)?.len();
    fs::copy(source, destination)?;

    // Verify destination size matches source before deleting
    let dest_size = fs::metadata(destination)?.len();
    if dest_size != source_size {
        let _ = fs::remove_file(destination);
        return Err(io::Error::other(format!(
            "Copy verification failed: source {} bytes, dest {} bytes",
            source_size, dest_size
        )));
    }

    fs::remove_file(source)
}

/// Create `dir` and its parents; succeeds if it already exists
pub fn ensure_directory(dir: &Path) -> Result<(), FileError> {
    fs::create_dir_all(dir).map_err(|e| FileError::io(FileAction::CreateDirectory, dir, e))
}
