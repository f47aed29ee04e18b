//! Average Hash (aHash) implementation.
//!
//! aHash works by:
//! 1. Converting to grayscale
//! 2. Resizing the image to hash_size x hash_size
//! 3. Computing the mean brightness
//! 4. For each pixel: if brighter than the mean, set bit to 1, else 0
//!
//! This is the default engine for canonical names: identical pixels always
//! produce the same 16-character hex string at hash_size 8.

use super::super::traits::{Fingerprint, HashAlgorithm, HashAlgorithmKind};
use crate::error::HashError;
use image::DynamicImage;

/// Average Hash (aHash) implementation
pub struct AverageHasher {
    /// Size of the hash (width and height)
    hash_size: u32,
}

impl AverageHasher {
    /// Create a new aHash hasher
    pub fn new(hash_size: u32) -> Self {
        Self { hash_size }
    }
}

impl HashAlgorithm for AverageHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        let gray = image.grayscale().resize_exact(
            self.hash_size,
            self.hash_size,
            image::imageops::FilterType::Lanczos3,
        );
        let gray = gray.to_luma8();

        let count = (self.hash_size * self.hash_size) as f64;
        let mean = gray.pixels().map(|p| p[0] as f64).sum::<f64>() / count;

        Ok(Fingerprint::from_bits(
            gray.pixels().map(|p| p[0] as f64 > mean),
        ))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Average
    }
}
