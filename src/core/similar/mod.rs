//! # Similar Photos Module
//!
//! Finds pairs of images in one directory that are visually similar but
//! not byte-identical, for human review.
//!
//! ## Two Filters
//! 1. **Lexical** - file stems must be alike (`0.8 <= ratio < 1.0`), which
//!    keeps the perceptual stage to a handful of candidate pairs
//! 2. **Perceptual** - fingerprints must be within a small Hamming
//!    distance (`< 3` by default)
//!
//! Pairs come from `i < j` over one sorted snapshot, so `(A, B)` and
//! `(B, A)` are never both reported and a file never pairs with itself.

mod lexical;
mod matcher;
mod types;

pub use lexical::sequence_ratio;
pub use matcher::{MatcherConfig, SimilarityMatcher};
pub use types::{MatchResult, SimilarityPair, SimilarityReport};
