//! Trait definitions for perceptual hashing.

use super::decode::open_image;
use crate::error::HashError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithmKind {
    /// Average Hash (aHash) - Bits set where a pixel is brighter than the mean
    Average,
    /// Difference Hash (dHash) - Compares brightness gradients between pixels
    Difference,
    /// Perceptual Hash (pHash) - DCT-based, robust to edits
    Perceptual,
}

impl HashAlgorithmKind {
    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            HashAlgorithmKind::Average => {
                "Average Hash (aHash) - Fast comparison based on average brightness"
            }
            HashAlgorithmKind::Difference => {
                "Difference Hash (dHash) - Compares brightness gradients between pixels"
            }
            HashAlgorithmKind::Perceptual => {
                "Perceptual Hash (pHash) - DCT-based, robust to edits and transformations"
            }
        }
    }
}

impl std::fmt::Display for HashAlgorithmKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithmKind::Average => write!(f, "aHash"),
            HashAlgorithmKind::Difference => write!(f, "dHash"),
            HashAlgorithmKind::Perceptual => write!(f, "pHash"),
        }
    }
}

/// The perceptual hash service.
///
/// Implementations must be deterministic for identical pixel content; the
/// canonical file names produced by the rename pass depend on it.
pub trait HashAlgorithm: Send + Sync {
    /// Compute a fingerprint from an already-loaded image
    fn hash_image(&self, image: &DynamicImage) -> Result<Fingerprint, HashError>;

    /// Compute a fingerprint directly from a file path
    fn hash_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let image = open_image(path)?;
        self.hash_image(&image)
    }

    /// Get the algorithm kind
    fn kind(&self) -> HashAlgorithmKind;
}

/// Fixed-length perceptual fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    bytes: Vec<u8>,
}

impl Fingerprint {
    /// Wrap raw fingerprint bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Pack a row-major bit sequence, most significant bit first
    pub fn from_bits<I>(bits: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut bytes = Vec::new();
        let mut current_byte: u8 = 0;
        let mut bit_position = 0;

        for bit in bits {
            if bit {
                current_byte |= 1 << (7 - bit_position);
            }

            bit_position += 1;

            if bit_position == 8 {
                bytes.push(current_byte);
                current_byte = 0;
                bit_position = 0;
            }
        }

        if bit_position > 0 {
            bytes.push(current_byte);
        }

        Self { bytes }
    }

    /// Hamming distance: the number of differing bits.
    ///
    /// Fingerprints of different lengths count the missing tail as differing.
    pub fn distance(&self, other: &Self) -> u32 {
        let common: u32 = self
            .bytes
            .iter()
            .zip(other.bytes.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum();
        let tail = self.bytes.len().abs_diff(other.bytes.len()) as u32 * 8;
        common + tail
    }

    /// Get the raw fingerprint bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hexadecimal rendering, used for canonical file names
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Get the total number of bits in this fingerprint
    pub fn bit_count(&self) -> u32 {
        (self.bytes.len() * 8) as u32
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let hash = Fingerprint::new(vec![0xFF, 0x00, 0xAA, 0x55]);
        assert_eq!(hash.distance(&hash), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let hash_a = Fingerprint::new(vec![0xFF, 0x00]);
        let hash_b = Fingerprint::new(vec![0x00, 0xFF]);

        assert_eq!(hash_a.distance(&hash_b), hash_b.distance(&hash_a));
    }

    #[test]
    fn distance_counts_differing_bits() {
        let hash_a = Fingerprint::new(vec![0b1111_1111]);
        let hash_b = Fingerprint::new(vec![0b0000_0000]);

        assert_eq!(hash_a.distance(&hash_b), 8);
    }

    #[test]
    fn distance_penalizes_length_mismatch() {
        let hash_a = Fingerprint::new(vec![0x00]);
        let hash_b = Fingerprint::new(vec![0x00, 0x00]);

        assert_eq!(hash_a.distance(&hash_b), 8);
    }

    #[test]
    fn from_bits_packs_msb_first() {
        let bits = [true, false, false, false, false, false, false, true, true];
        let hash = Fingerprint::from_bits(bits);
        assert_eq!(hash.as_bytes(), &[0b1000_0001, 0b1000_0000]);
    }

    #[test]
    fn to_hex_produces_correct_string() {
        let hash = Fingerprint::new(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(hash.to_hex(), "deadbeef");
        assert_eq!(hash.to_string(), "deadbeef");
    }

    #[test]
    fn algorithm_kind_display() {
        assert_eq!(HashAlgorithmKind::Average.to_string(), "aHash");
        assert_eq!(HashAlgorithmKind::Difference.to_string(), "dHash");
        assert_eq!(HashAlgorithmKind::Perceptual.to_string(), "pHash");
    }
}
