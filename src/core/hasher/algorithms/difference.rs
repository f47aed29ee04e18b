//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Resizing the image to (hash_size+1) x hash_size
//! 2. Converting to grayscale
//! 3. Comparing each pixel to the one to its right
//! 4. If left pixel is brighter, set bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes.

use super::super::traits::{Fingerprint, HashAlgorithm, HashAlgorithmKind};
use crate::error::HashError;
use image::DynamicImage;

/// Difference Hash (dHash) implementation
pub struct DifferenceHasher {
    /// Size of the hash (width and height of comparison grid)
    hash_size: u32,
}

impl DifferenceHasher {
    /// Create a new dHash hasher
    pub fn new(hash_size: u32) -> Self {
        Self { hash_size }
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError> {
        // One extra column to compute differences
        let gray = image
            .resize_exact(
                self.hash_size + 1,
                self.hash_size,
                image::imageops::FilterType::Triangle,
            )
            .to_luma8();

        let size = self.hash_size;
        let gray = &gray;
        let bits = (0..size).flat_map(move |y| {
            // Set bit if left is brighter than right
            (0..size).map(move |x| gray.get_pixel(x, y)[0] > gray.get_pixel(x + 1, y)[0])
        });

        Ok(Fingerprint::from_bits(bits))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Difference
    }
}
