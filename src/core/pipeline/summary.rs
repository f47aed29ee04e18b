//! Typed results of a run.

use super::Mode;
use crate::core::identity::ResolveOutcome;
use crate::core::organize::RelocateOutcome;
use crate::core::quarantine::SinkOutcome;
use crate::core::similar::SimilarityReport;
use crate::error::{FileError, ScanError};
use crate::events::PipelineSummary;
use std::path::PathBuf;

/// A file that could not be processed by one pass
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub mode: Mode,
    pub error: FileError,
}

/// Everything a run did
#[derive(Debug, Default)]
pub struct RunSummary {
    pub root: PathBuf,
    pub modes: Vec<Mode>,
    /// Directory visits, summed over all passes
    pub directories: usize,
    pub renamed: usize,
    pub unchanged: usize,
    pub quarantined: usize,
    pub deleted: usize,
    pub moved: usize,
    pub in_place: usize,
    /// Directories with at least one confirmed pair
    pub reports: Vec<SimilarityReport>,
    /// Lexically admitted pairs that failed the perceptual check
    pub rejected_pairs: usize,
    pub failures: Vec<FileFailure>,
    /// Directories that could not be walked or listed
    pub scan_errors: Vec<ScanError>,
    pub report_path: Option<PathBuf>,
    pub cancelled: bool,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn new(root: PathBuf, modes: Vec<Mode>) -> Self {
        Self {
            root,
            modes,
            ..Default::default()
        }
    }

    pub fn similar_pairs(&self) -> usize {
        self.reports.iter().map(SimilarityReport::len).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty() || !self.scan_errors.is_empty()
    }

    pub(crate) fn record_resolve(&mut self, outcome: &ResolveOutcome) {
        match outcome {
            ResolveOutcome::Renamed { .. } => self.renamed += 1,
            ResolveOutcome::Unchanged { .. } => self.unchanged += 1,
            ResolveOutcome::MarkedDuplicate { sink, .. } => self.record_sink(sink),
        }
    }

    pub(crate) fn record_relocate(&mut self, outcome: &RelocateOutcome) {
        match outcome {
            RelocateOutcome::Moved { .. } => self.moved += 1,
            RelocateOutcome::AlreadyInPlace { .. } => self.in_place += 1,
            RelocateOutcome::RoutedToDuplicateSink { sink, .. } => self.record_sink(sink),
        }
    }

    fn record_sink(&mut self, outcome: &SinkOutcome) {
        match outcome {
            SinkOutcome::Quarantined { .. } => self.quarantined += 1,
            SinkOutcome::Deleted { .. } => self.deleted += 1,
        }
    }

    /// Counters only, for the completion event
    pub fn totals(&self) -> PipelineSummary {
        PipelineSummary {
            directories: self.directories,
            renamed: self.renamed,
            unchanged: self.unchanged,
            quarantined: self.quarantined,
            deleted: self.deleted,
            moved: self.moved,
            in_place: self.in_place,
            similar_pairs: self.similar_pairs(),
            failures: self.failures.len() + self.scan_errors.len(),
            cancelled: self.cancelled,
            duration_ms: self.duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_are_counted() {
        let mut summary = RunSummary::new(PathBuf::from("/photos"), vec![Mode::Rename]);

        summary.record_resolve(&ResolveOutcome::Unchanged {
            path: PathBuf::from("/photos/ab.jpg"),
        });
        summary.record_resolve(&ResolveOutcome::MarkedDuplicate {
            path: PathBuf::from("/photos/copy.jpg"),
            canonical: "ab.jpg".to_string(),
            sink: SinkOutcome::Deleted {
                existing: PathBuf::from("/photos~duplicates/ab.jpg"),
            },
        });
        summary.record_relocate(&RelocateOutcome::AlreadyInPlace {
            path: PathBuf::from("/photos/a/ab.jpg"),
        });

        let totals = summary.totals();
        assert_eq!(totals.unchanged, 1);
        assert_eq!(totals.deleted, 1);
        assert_eq!(totals.in_place, 1);
        assert_eq!(totals.renamed, 0);
        assert!(!summary.has_failures());
    }
}
