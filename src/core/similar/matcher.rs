//! Pairwise matching within one directory.

use super::lexical::sequence_ratio;
use super::types::{MatchResult, SimilarityPair, SimilarityReport};
use crate::core::hasher::{Fingerprint, HashAlgorithm};
use crate::core::scanner::FileEntry;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Thresholds for the two filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Inclusive lower bound on the stem ratio
    pub min_lexical: f64,
    /// Exclusive upper bound on the stem ratio; excludes identical stems
    pub max_lexical: f64,
    /// Exclusive upper bound on the fingerprint distance
    pub max_distance: u32,
}

impl MatcherConfig {
    pub fn new() -> Self {
        Self {
            min_lexical: 0.8,
            max_lexical: 1.0,
            max_distance: 3,
        }
    }

    pub fn min_lexical(mut self, min: f64) -> Self {
        self.min_lexical = min;
        self
    }

    pub fn max_lexical(mut self, max: f64) -> Self {
        self.max_lexical = max;
        self
    }

    pub fn max_distance(mut self, max: u32) -> Self {
        self.max_distance = max;
        self
    }

    /// Does a stem ratio pass the lexical prefilter?
    pub fn admits(&self, lexical_score: f64) -> bool {
        lexical_score >= self.min_lexical && lexical_score < self.max_lexical
    }

    /// Does a fingerprint distance confirm the pair?
    pub fn confirms(&self, distance: u32) -> bool {
        distance < self.max_distance
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds similar pairs among one directory's files
pub struct SimilarityMatcher<'a> {
    hasher: &'a dyn HashAlgorithm,
    config: MatcherConfig,
}

impl<'a> SimilarityMatcher<'a> {
    pub fn new(hasher: &'a dyn HashAlgorithm, config: MatcherConfig) -> Self {
        Self { hasher, config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Match `files`, the sorted snapshot of `directory`
    ///
    /// Names are compared by [`FileEntry::stem`], everything before the first dot.
    pub fn match_directory(&self, directory: &Path, files: &[FileEntry]) -> MatchResult {
        let candidates = self.lexical_candidates(files);

        // Each admitted file is hashed once, however many pairs it is in
        let needed: BTreeSet<usize> = candidates
            .iter()
            .flat_map(|&(i, j, _)| [i, j])
            .collect();

        let hashed: Vec<_> = needed
            .into_par_iter()
            .map(|i| (i, self.hasher.hash_file(&files[i].path)))
            .collect();

        let mut fingerprints: Vec<Option<Fingerprint>> = vec![None; files.len()];
        let mut failures = Vec::new();

        for (i, result) in hashed {
            match result {
                Ok(fingerprint) => fingerprints[i] = Some(fingerprint),
                Err(e) => {
                    debug!("Skipping pairs with {}: {}", files[i].path.display(), e);
                    failures.push((files[i].path.clone(), e));
                }
            }
        }

        let mut report = SimilarityReport::new(directory);
        let mut rejected = 0;

        for (i, j, lexical_score) in candidates {
            let (Some(left), Some(right)) = (&fingerprints[i], &fingerprints[j]) else {
                continue;
            };

            let distance = left.distance(right);
            if !self.config.confirms(distance) {
                debug!("Not similar enough...");
                rejected += 1;
                continue;
            }

            let pair = SimilarityPair {
                left: files[i].clone(),
                right: files[j].clone(),
                lexical_score,
                perceptual_distance: distance,
            };
            info!(
                "Similarity [{}] found between {} and {} ({}%)",
                report.len() + 1,
                pair.left.file_name(),
                pair.right.file_name(),
                pair.percent()
            );
            report.pairs.push(pair);
        }

        info!("Similarities found: {}", report.len());

        MatchResult {
            report,
            rejected,
            failures,
        }
    }

    /// Pairs `i < j` whose stems pass the lexical filter
    fn lexical_candidates(&self, files: &[FileEntry]) -> Vec<(usize, usize, f64)> {
        let stems: Vec<&str> = files.iter().map(FileEntry::stem).collect();
        let mut candidates = Vec::new();

        for i in 0..files.len() {
            for j in (i + 1)..files.len() {
                let score = sequence_ratio(stems[i], stems[j]);
                if self.config.admits(score) {
                    candidates.push((i, j, score));
                }
            }
        }

        candidates
    }
}
