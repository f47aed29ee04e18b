//! # Pipeline Module
//!
//! Runs the selected passes over a directory tree.
//!
//! ## Passes
//! Each selected [`Mode`] is one full walk of the tree, always in the order
//! `similar`, `rename`, `move`, `organize`. Directories are enumerated when
//! a pass starts, so directories created by that pass (buckets, `~unsorted`)
//! are only visited by later passes.
//!
//! ## Parallelism
//! Within a directory, fingerprints are computed in parallel with rayon;
//! the renames and moves that follow run one file at a time in listing
//! order.

mod executor;
mod mode;
mod summary;

pub use executor::{CancellationToken, Pipeline, PipelineBuilder, PipelineConfig, ReportTarget};
pub use mode::Mode;
pub use summary::{FileFailure, RunSummary};
