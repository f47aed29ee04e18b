//! Pipeline execution implementation.

use super::mode::Mode;
use super::summary::{FileFailure, RunSummary};
use crate::core::hasher::{HashAlgorithm, HashAlgorithmKind, HasherConfig};
use crate::core::identity::{IdentityResolver, ResolveOutcome};
use crate::core::organize::{RelocateOutcome, Relocator, TargetPolicy};
use crate::core::quarantine::{DuplicateSink, SinkOutcome};
use crate::core::registry::NameRegistry;
use crate::core::reporter::{export_to_file, ReportFormat};
use crate::core::scanner::{FileEntry, ScanConfig, SkipSet, TreeWalker};
use crate::core::similar::{MatcherConfig, SimilarityMatcher};
use crate::error::{DedupError, FileError};
use crate::events::{
    null_sender, DirectoryEvent, Event, EventSender, FileEvent, PipelineEvent, SimilarEvent,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Shared stop flag, checked at every directory boundary
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Where the similarity report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTarget {
    pub path: PathBuf,
    pub format: ReportFormat,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub root: PathBuf,
    /// Deduplicated, in execution order
    pub modes: Vec<Mode>,
    /// `None` means `<root>~duplicates`
    pub duplicate_dir: Option<PathBuf>,
    /// Subdirectory names of the root that are never entered
    pub skip: Vec<String>,
    pub algorithm: HashAlgorithmKind,
    pub hash_size: u32,
    pub scan_config: ScanConfig,
    pub matcher_config: MatcherConfig,
    /// Written after the similarity pass, if any
    pub report: Option<ReportTarget>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            modes: Vec::new(),
            duplicate_dir: None,
            skip: Vec::new(),
            algorithm: HashAlgorithmKind::Average,
            hash_size: 8,
            scan_config: ScanConfig::default(),
            matcher_config: MatcherConfig::default(),
            report: None,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    hasher: Option<Box<dyn HashAlgorithm>>,
    token: CancellationToken,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            hasher: None,
            token: CancellationToken::new(),
        }
    }

    /// Set the directory tree to process
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Select passes; order and repeats do not matter
    pub fn modes(mut self, modes: impl IntoIterator<Item = Mode>) -> Self {
        let mut modes: Vec<Mode> = modes.into_iter().collect();
        modes.sort();
        modes.dedup();
        self.config.modes = modes;
        self
    }

    /// Override the quarantine directory
    pub fn duplicate_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.duplicate_dir = Some(dir.into());
        self
    }

    /// Never enter `<root>/<name>`
    pub fn skip(mut self, name: impl Into<String>) -> Self {
        self.config.skip.push(name.into());
        self
    }

    /// Set the hash algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithmKind) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    pub fn hash_size(mut self, size: u32) -> Self {
        self.config.hash_size = size;
        self
    }

    /// Use a custom hash engine instead of `algorithm`
    pub fn hasher(mut self, hasher: Box<dyn HashAlgorithm>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Include hidden files and directories
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan_config.include_hidden = include;
        self
    }

    pub fn matcher_config(mut self, config: MatcherConfig) -> Self {
        self.config.matcher_config = config;
        self
    }

    /// Write the similarity report to `path`
    pub fn report(mut self, path: impl Into<PathBuf>, format: ReportFormat) -> Self {
        self.config.report = Some(ReportTarget {
            path: path.into(),
            format,
        });
        self
    }

    /// Share a cancellation token with the caller
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<Pipeline, DedupError> {
        if self.config.root.as_os_str().is_empty() {
            return Err(DedupError::Config("No root directory given".to_string()));
        }
        if self.config.modes.is_empty() {
            return Err(DedupError::Config("No mode selected".to_string()));
        }

        let hasher = match self.hasher {
            Some(hasher) => hasher,
            None => HasherConfig::new()
                .algorithm(self.config.algorithm)
                .hash_size(self.config.hash_size)
                .build(),
        };

        Ok(Pipeline {
            config: self.config,
            hasher,
            token: self.token,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The canonicalize / organize / match pipeline
pub struct Pipeline {
    config: PipelineConfig,
    hasher: Box<dyn HashAlgorithm>,
    token: CancellationToken,
}

/// State shared by every pass of one run
struct RunContext<'a> {
    walker: TreeWalker,
    registry: NameRegistry,
    sink: DuplicateSink,
    events: &'a EventSender,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Token that stops this pipeline when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<RunSummary, DedupError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<RunSummary, DedupError> {
        let start_time = Instant::now();
        let root = self.config.root.as_path();

        let duplicate_dir = self
            .config
            .duplicate_dir
            .clone()
            .unwrap_or_else(|| DuplicateSink::default_directory(root));

        let skip = SkipSet::from_names(root, &self.config.skip).with_path(duplicate_dir.clone());

        // A fresh registry per run keeps reruns over a canonical tree no-ops
        let context = RunContext {
            walker: TreeWalker::new(self.config.scan_config.clone(), skip),
            registry: NameRegistry::new(),
            sink: DuplicateSink::new(duplicate_dir),
            events,
        };

        let mut summary = RunSummary::new(root.to_path_buf(), self.config.modes.clone());

        events.send(Event::Pipeline(PipelineEvent::Started {
            root: root.to_path_buf(),
            modes: self.config.modes.clone(),
        }));
        info!(
            "Processing {} ({})",
            root.display(),
            self.config
                .modes
                .iter()
                .map(Mode::to_string)
                .collect::<Vec<_>>()
                .join("+")
        );

        for &mode in &self.config.modes {
            self.run_pass(mode, &context, &mut summary)?;
            if summary.cancelled {
                break;
            }
        }

        if summary.cancelled {
            warn!("Run cancelled, stopping early");
            events.send(Event::Pipeline(PipelineEvent::Cancelled));
        }

        if let Some(target) = &self.config.report {
            if self.config.modes.contains(&Mode::Similar) {
                export_to_file(&summary.reports, root, &target.path, target.format)?;
                info!("Similarity report written to {}", target.path.display());
                events.send(Event::Pipeline(PipelineEvent::ReportWritten {
                    path: target.path.clone(),
                }));
                summary.report_path = Some(target.path.clone());
            }
        }

        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: summary.totals(),
        }));

        Ok(summary)
    }

    fn run_pass(
        &self,
        mode: Mode,
        context: &RunContext<'_>,
        summary: &mut RunSummary,
    ) -> Result<(), DedupError> {
        let root = self.config.root.as_path();

        // Enumerated up front: directories created during the pass are not visited
        let walk = context.walker.directories(root)?;
        for error in walk.errors {
            error!("{}", error);
            summary.scan_errors.push(error);
        }

        context.events.send(Event::Pipeline(PipelineEvent::PassStarted {
            mode,
            directories: walk.directories.len(),
        }));
        debug!("{} pass over {} directories", mode, walk.directories.len());

        for dir in &walk.directories {
            if self.token.is_cancelled() {
                summary.cancelled = true;
                return Ok(());
            }

            let listing = match context.walker.list_files(dir) {
                Ok(listing) => listing,
                Err(e) => {
                    error!("{}", e);
                    context.events.send(Event::Directory(DirectoryEvent::Error {
                        path: dir.clone(),
                        message: e.to_string(),
                    }));
                    summary.scan_errors.push(e);
                    continue;
                }
            };

            summary.directories += 1;
            for error in listing.errors {
                record_failure(context.events, summary, dir.clone(), mode, error);
            }

            context.events.send(Event::Directory(DirectoryEvent::Entered {
                mode,
                path: dir.clone(),
                files: listing.files.len(),
            }));

            match mode {
                Mode::Rename => self.rename_directory(&listing.files, context, summary),
                Mode::Move => self.relocate_directory(
                    TargetPolicy::Flat,
                    &listing.files,
                    context,
                    summary,
                ),
                Mode::Organize => self.relocate_directory(
                    TargetPolicy::Bucketed,
                    &listing.files,
                    context,
                    summary,
                ),
                Mode::Similar => self.match_directory(dir, &listing.files, context, summary),
            }
        }

        context
            .events
            .send(Event::Pipeline(PipelineEvent::PassCompleted { mode }));
        Ok(())
    }

    fn rename_directory(
        &self,
        files: &[FileEntry],
        context: &RunContext<'_>,
        summary: &mut RunSummary,
    ) {
        let resolver = IdentityResolver::new(
            self.hasher.as_ref(),
            &context.registry,
            &context.sink,
        );

        let fingerprints: Vec<_> = files.par_iter().map(|f| resolver.fingerprint(f)).collect();

        for (file, fingerprint) in files.iter().zip(fingerprints) {
            match fingerprint.and_then(|fp| resolver.apply(file, &fp)) {
                Ok(outcome) => {
                    summary.record_resolve(&outcome);
                    context.events.send(Event::File(resolve_event(&outcome)));
                }
                Err(e) => {
                    record_failure(context.events, summary, file.path.clone(), Mode::Rename, e)
                }
            }
        }
    }

    fn relocate_directory(
        &self,
        policy: TargetPolicy,
        files: &[FileEntry],
        context: &RunContext<'_>,
        summary: &mut RunSummary,
    ) {
        let mode = match policy {
            TargetPolicy::Flat => Mode::Move,
            TargetPolicy::Bucketed => Mode::Organize,
        };
        let relocator = Relocator::new(self.hasher.as_ref(), &context.sink);

        for file in files {
            let Some(target_dir) = policy.target_dir(&self.config.root, file) else {
                continue;
            };

            match relocator.relocate(file, &target_dir) {
                Ok(outcome) => {
                    summary.record_relocate(&outcome);
                    context.events.send(Event::File(relocate_event(&outcome)));
                }
                Err(e) => record_failure(context.events, summary, file.path.clone(), mode, e),
            }
        }
    }

    fn match_directory(
        &self,
        dir: &Path,
        files: &[FileEntry],
        context: &RunContext<'_>,
        summary: &mut RunSummary,
    ) {
        let matcher = SimilarityMatcher::new(self.hasher.as_ref(), self.config.matcher_config);
        let result = matcher.match_directory(dir, files);

        for (path, error) in result.failures {
            record_failure(
                context.events,
                summary,
                path,
                Mode::Similar,
                FileError::Hash(error),
            );
        }

        for pair in &result.report.pairs {
            context.events.send(Event::Similar(SimilarEvent::PairFound {
                left: pair.left.path.clone(),
                right: pair.right.path.clone(),
                percent: pair.percent(),
                distance: pair.perceptual_distance,
            }));
        }

        context
            .events
            .send(Event::Similar(SimilarEvent::DirectoryMatched {
                directory: dir.to_path_buf(),
                pairs: result.report.len(),
                rejected: result.rejected,
            }));

        summary.rejected_pairs += result.rejected;
        if !result.report.is_empty() {
            summary.reports.push(result.report);
        }
    }
}

fn record_failure(
    events: &EventSender,
    summary: &mut RunSummary,
    path: PathBuf,
    mode: Mode,
    error: FileError,
) {
    error!("There was an error handling {}: {}", path.display(), error);
    events.send(Event::File(FileEvent::Failed {
        path: path.clone(),
        mode,
        message: error.to_string(),
    }));
    summary.failures.push(FileFailure { path, mode, error });
}

fn sink_event(path: &Path, sink: &SinkOutcome) -> FileEvent {
    match sink {
        SinkOutcome::Quarantined { destination } => FileEvent::Quarantined {
            path: path.to_path_buf(),
            destination: destination.clone(),
        },
        SinkOutcome::Deleted { existing } => FileEvent::Deleted {
            path: path.to_path_buf(),
            existing: existing.clone(),
        },
    }
}

fn resolve_event(outcome: &ResolveOutcome) -> FileEvent {
    match outcome {
        ResolveOutcome::Renamed { from, to } => FileEvent::Renamed {
            from: from.clone(),
            to: to.clone(),
        },
        ResolveOutcome::Unchanged { path } => FileEvent::Unchanged { path: path.clone() },
        ResolveOutcome::MarkedDuplicate { path, sink, .. } => sink_event(path, sink),
    }
}

fn relocate_event(outcome: &RelocateOutcome) -> FileEvent {
    match outcome {
        RelocateOutcome::Moved { from, to } => FileEvent::Moved {
            from: from.clone(),
            to: to.clone(),
        },
        RelocateOutcome::AlreadyInPlace { path } => {
            FileEvent::AlreadyInPlace { path: path.clone() }
        }
        RelocateOutcome::RoutedToDuplicateSink { path, sink, .. } => sink_event(path, sink),
    }
}
