//! Types for the organize module.

use crate::core::quarantine::SinkOutcome;
use crate::core::scanner::FileEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bucket used by the flat policy
pub const UNSORTED_BUCKET: &str = "~unsorted";

/// Where relocated files end up, relative to the root
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    /// Everything into `<root>/~unsorted`
    #[default]
    Flat,
    /// `<root>/<first character of the file name>`, case-sensitive
    Bucketed,
}

impl TargetPolicy {
    /// Target directory for `file`
    pub fn target_dir(&self, root: &Path, file: &FileEntry) -> Option<PathBuf> {
        match self {
            TargetPolicy::Flat => Some(root.join(UNSORTED_BUCKET)),
            TargetPolicy::Bucketed => file
                .file_name()
                .chars()
                .next()
                .map(|first| root.join(first.to_string())),
        }
    }
}

/// Result of relocating one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelocateOutcome {
    /// The file was moved into the target directory
    Moved { from: PathBuf, to: PathBuf },
    /// The file already sits in the target directory
    AlreadyInPlace { path: PathBuf },
    /// The target name was taken by another file; this one was sunk
    RoutedToDuplicateSink {
        path: PathBuf,
        canonical: String,
        sink: SinkOutcome,
    },
}
