//! # Core Module
//!
//! The canonical-naming and similarity engine, independent of any UI.
//!
//! ## Modules
//! - `scanner` - Walks the tree and lists accepted image files
//! - `hasher` - Computes perceptual fingerprints
//! - `registry` - Canonical names claimed during a run
//! - `identity` - Renames files to their canonical name
//! - `quarantine` - Holds duplicates, one per canonical name
//! - `organize` - Moves files into `~unsorted` or first-letter buckets
//! - `similar` - Finds visually similar pairs within a directory
//! - `reporter` - Renders similarity reports
//! - `pipeline` - Runs the selected passes over the tree

pub mod hasher;
pub mod identity;
pub mod organize;
pub mod pipeline;
pub mod quarantine;
pub mod registry;
pub mod reporter;
pub mod scanner;
pub mod similar;
pub mod transfer;

// Re-export commonly used types
pub use hasher::{Fingerprint, HashAlgorithm, HashAlgorithmKind};
pub use identity::{IdentityResolver, ResolveOutcome};
pub use organize::{RelocateOutcome, Relocator, TargetPolicy};
pub use pipeline::{Mode, Pipeline, RunSummary};
pub use quarantine::{DuplicateSink, SinkOutcome};
pub use registry::NameRegistry;
pub use scanner::FileEntry;
pub use similar::{SimilarityMatcher, SimilarityPair, SimilarityReport};
