//! Hashers for unit tests that control fingerprints through file content.

use super::{Fingerprint, HashAlgorithm, HashAlgorithmKind};
use crate::error::HashError;
use image::DynamicImage;
use std::fs;
use std::path::Path;

/// Uses the raw file bytes as the fingerprint, so tests pick distances exactly
pub(crate) struct ContentHasher;

impl HashAlgorithm for ContentHasher {
    fn hash_image(&self, _image: &DynamicImage) -> Result<Fingerprint, HashError> {
        Err(HashError::UnsupportedFormat {
            format: "content hasher never decodes".to_string(),
        })
    }

    fn hash_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let bytes = fs::read(path).map_err(|e| HashError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

        if bytes.is_empty() {
            return Err(HashError::EmptyImage {
                path: path.to_path_buf(),
            });
        }

        Ok(Fingerprint::new(bytes))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Average
    }
}
