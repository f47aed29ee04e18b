//! # Hasher Module
//!
//! The perceptual hash service: turns an image into a fixed-length
//! fingerprint and measures the distance between two fingerprints.
//!
//! ## Supported Algorithms
//! - **aHash (Average Hash)** - Default; canonical names are built from it
//! - **dHash (Difference Hash)** - Compares brightness gradients
//! - **pHash (Perceptual Hash)** - DCT based, most robust to edits
//!
//! Every engine sits behind [`HashAlgorithm`], so the identity and
//! similarity code never depend on how a fingerprint is computed.
//!
//! ## Example
//! ```rust,ignore
//! use photo_canon::core::hasher::{HasherConfig, HashAlgorithmKind};
//!
//! let hasher = HasherConfig::new()
//!     .algorithm(HashAlgorithmKind::Average)
//!     .build();
//!
//! let fingerprint = hasher.hash_file(&path)?;
//! println!("{}", fingerprint.to_hex());
//! ```

mod algorithms;
mod decode;
mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use algorithms::{AverageHasher, DifferenceHasher, PerceptualHasher};
pub use decode::open_image;
pub use traits::{Fingerprint, HashAlgorithm, HashAlgorithmKind};

/// Configuration builder for hashers
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Hash size (8, 16, or 32)
    hash_size: u32,
    /// Algorithm to use
    algorithm: HashAlgorithmKind,
}

impl HasherConfig {
    /// Create a new hasher configuration with defaults
    pub fn new() -> Self {
        Self {
            hash_size: 8,
            algorithm: HashAlgorithmKind::Average,
        }
    }

    /// Set the hash size (8, 16, or 32)
    ///
    /// Changing it changes every canonical name, so a tree renamed with one
    /// size will be renamed again with another.
    pub fn hash_size(mut self, size: u32) -> Self {
        self.hash_size = size;
        self
    }

    /// Set the hash algorithm
    pub fn algorithm(mut self, algorithm: HashAlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Build the hasher
    pub fn build(self) -> Box<dyn HashAlgorithm> {
        match self.algorithm {
            HashAlgorithmKind::Average => Box::new(AverageHasher::new(self.hash_size)),
            HashAlgorithmKind::Difference => Box::new(DifferenceHasher::new(self.hash_size)),
            HashAlgorithmKind::Perceptual => Box::new(PerceptualHasher::new(self.hash_size)),
        }
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}
