//! Event type definitions for progress reporting.

use crate::core::pipeline::Mode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Run and pass boundaries
    Pipeline(PipelineEvent),
    /// Directory visits
    Directory(DirectoryEvent),
    /// What happened to a single file
    File(FileEvent),
    /// Similarity matching results
    Similar(SimilarEvent),
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// The run has started
    Started { root: PathBuf, modes: Vec<Mode> },
    /// A full tree pass for one mode begins
    PassStarted { mode: Mode, directories: usize },
    /// A full tree pass for one mode ended
    PassCompleted { mode: Mode },
    /// A report file was written
    ReportWritten { path: PathBuf },
    /// The run finished
    Completed { summary: PipelineSummary },
    /// The run stopped at a directory boundary after cancellation
    Cancelled,
}

/// Directory-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DirectoryEvent {
    /// A directory is about to be processed
    Entered {
        mode: Mode,
        path: PathBuf,
        files: usize,
    },
    /// A directory could not be listed; the walk continues
    Error { path: PathBuf, message: String },
}

/// Per-file outcomes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FileEvent {
    /// Renamed to its canonical name
    Renamed { from: PathBuf, to: PathBuf },
    /// Already canonically named
    Unchanged { path: PathBuf },
    /// Moved into quarantine
    Quarantined { path: PathBuf, destination: PathBuf },
    /// Deleted because quarantine already holds its name
    Deleted { path: PathBuf, existing: PathBuf },
    /// Relocated by the move or organize pass
    Moved { from: PathBuf, to: PathBuf },
    /// Already in its target directory
    AlreadyInPlace { path: PathBuf },
    /// Processing failed; the run continues
    Failed {
        path: PathBuf,
        mode: Mode,
        message: String,
    },
}

/// Similarity pass events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SimilarEvent {
    /// A pair passed both filters
    PairFound {
        left: PathBuf,
        right: PathBuf,
        percent: u32,
        distance: u32,
    },
    /// One directory has been matched
    DirectoryMatched {
        directory: PathBuf,
        pairs: usize,
        rejected: usize,
    },
}

/// Totals of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub directories: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub quarantined: usize,
    pub deleted: usize,
    pub moved: usize,
    pub in_place: usize,
    pub similar_pairs: usize,
    pub failures: usize,
    pub cancelled: bool,
    pub duration_ms: u64,
}
