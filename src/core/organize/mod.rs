//! # Organize Module
//!
//! Moves images out of their source directory into a target layout under
//! the root: either one flat `~unsorted` bucket or one bucket per first
//! character of the file name.
//!
//! A file is never overwritten. When the target name is already taken by a
//! different file, the incoming file is fingerprinted and handed to the
//! [`DuplicateSink`](crate::core::quarantine::DuplicateSink).

mod relocator;
mod types;

pub use relocator::Relocator;
pub use types::{RelocateOutcome, TargetPolicy, UNSORTED_BUCKET};
