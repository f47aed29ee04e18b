//! # Quarantine Module
//!
//! The duplicate sink: a directory holding files identified as duplicates,
//! keyed by canonical name.
//!
//! A file whose canonical name is already present in quarantine is deleted
//! instead of being stored twice. This treats equal fingerprints as equal
//! content, which holds for true duplicates but can misfire on rare
//! average-hash collisions between unrelated images.

use crate::core::transfer::{ensure_directory, move_file};
use crate::error::{FileAction, FileError};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Suffix appended to the root path for the default quarantine location
pub const DEFAULT_SUFFIX: &str = "~duplicates";

/// What happened to a file handed to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SinkOutcome {
    /// An identical name was already quarantined; the incoming file was removed
    Deleted { existing: PathBuf },
    /// The file now lives in quarantine
    Quarantined { destination: PathBuf },
}

/// Quarantine directory for duplicates
#[derive(Debug)]
pub struct DuplicateSink {
    directory: PathBuf,
    // Serializes the exists-check and the move/delete that follows it
    guard: Mutex<()>,
}

impl DuplicateSink {
    /// Use `directory` as quarantine; it is created on first use
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            guard: Mutex::new(()),
        }
    }

    /// `<root>~duplicates`, a sibling of the root directory
    pub fn default_directory(root: &Path) -> PathBuf {
        let normalized: PathBuf = root.components().collect();
        let mut name: OsString = normalized.into_os_string();
        name.push(DEFAULT_SUFFIX);
        PathBuf::from(name)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Quarantine `file` under `canonical`, or delete it if that name is taken
    pub fn sink(&self, file: &Path, canonical: &str) -> Result<SinkOutcome, FileError> {
        let _guard = self
            .guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        ensure_directory(&self.directory)?;

        let destination = self.directory.join(canonical);

        if destination == file {
            return Ok(SinkOutcome::Quarantined { destination });
        }

        if destination.is_file() {
            fs::remove_file(file).map_err(|e| FileError::io(FileAction::Delete, file, e))?;
            info!(
                "Deleting extra duplicate {} ({})",
                file.display(),
                destination.display()
            );
            return Ok(SinkOutcome::Deleted {
                existing: destination,
            });
        }

        move_file(file, &destination)?;
        info!("Moving {} to duplicate image directory", canonical);

        Ok(SinkOutcome::Quarantined { destination })
    }
}
