//! Types for similar photo detection.

use crate::core::scanner::FileEntry;
use crate::error::HashError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Two files that passed both the lexical and the perceptual filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub left: FileEntry,
    pub right: FileEntry,
    /// Stem similarity in `[0, 1]`
    pub lexical_score: f64,
    /// Hamming distance between the two fingerprints
    pub perceptual_distance: u32,
}

impl SimilarityPair {
    /// Lexical score as a truncated percentage
    pub fn percent(&self) -> u32 {
        (self.lexical_score * 100.0) as u32
    }

    /// Order-independent identity of the pair
    pub fn key(&self) -> (&Path, &Path) {
        let (a, b) = (self.left.path.as_path(), self.right.path.as_path());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// Confirmed pairs of one directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub directory: PathBuf,
    pub pairs: Vec<SimilarityPair>,
}

impl SimilarityReport {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            pairs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Everything one directory's matching pass produced
#[derive(Debug)]
pub struct MatchResult {
    pub report: SimilarityReport,
    /// Admitted pairs whose distance was too large
    pub rejected: usize,
    /// Files that could not be fingerprinted; their pairs were dropped
    pub failures: Vec<(PathBuf, HashError)>,
}
