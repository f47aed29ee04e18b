//! # photo-canon
//!
//! Gives every image in a directory tree a name derived from its content,
//! quarantines the duplicates this exposes, gathers or buckets images into
//! a tidy layout, and reports visually similar pairs for review.
//!
//! ## Architecture
//! - `core` - The engine: hashing, naming, relocation, matching
//! - `events` - Progress events for whatever drives a run
//! - `error` - Typed errors
//!
//! ## Example
//! ```rust,ignore
//! use photo_canon::core::pipeline::{Mode, Pipeline};
//!
//! let summary = Pipeline::builder()
//!     .root("/photos")
//!     .modes([Mode::Rename, Mode::Similar])
//!     .build()?
//!     .run()?;
//! println!("{} renamed, {} quarantined", summary.renamed, summary.quarantined);
//! ```

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DedupError, Result};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// How much the run logs when `RUST_LOG` is not set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Every rename, move and match
    #[default]
    Normal,
    /// Plus collision and rejection details
    Verbose,
}

impl Verbosity {
    /// Map `--quiet`/`--verbose`; asking for both means verbose
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (_, true) => Verbosity::Verbose,
            (true, false) => Verbosity::Quiet,
            (false, false) => Verbosity::Normal,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
        }
    }
}

/// Initialize tracing to stderr
///
/// This should be called by the application entry point.
pub fn init_tracing(verbosity: Verbosity) {
    init_tracing_with_writer(verbosity, std::io::stderr);
}

/// Initialize tracing with a custom writer; `RUST_LOG` overrides `verbosity`
///
/// A second call is a no-op.
pub fn init_tracing_with_writer<W>(verbosity: Verbosity, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .without_time()
        .try_init();
}
