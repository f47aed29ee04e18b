//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use assert_fs::fixture::ChildPath;
use image::{Rgb, RgbImage};
use photo_canon::core::hasher::{Fingerprint, HashAlgorithm, HashAlgorithmKind};
use photo_canon::error::HashError;
use std::fs;
use std::path::Path;

/// Average hash of a left-dark / right-bright image
pub const LEFT_RIGHT_HASH: &str = "0f0f0f0f0f0f0f0f";
/// Average hash of a top-dark / bottom-bright image
pub const TOP_BOTTOM_HASH: &str = "00000000ffffffff";

#[derive(Debug, Clone, Copy)]
pub enum Split {
    LeftRight,
    TopBottom,
}

/// Write a 64x64 two-tone PNG
pub fn write_png(child: &ChildPath, split: Split, dark: u8, bright: u8) {
    let path = child.path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let image = RgbImage::from_fn(64, 64, |x, y| {
        let bright_half = match split {
            Split::LeftRight => x >= 32,
            Split::TopBottom => y >= 32,
        };
        let v = if bright_half { bright } else { dark };
        Rgb([v, v, v])
    });
    image.save(path).unwrap();
}

/// Write arbitrary bytes, creating parent directories
pub fn write_bytes(child: &ChildPath, content: &[u8]) {
    let path = child.path();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Sorted entry names of a directory
pub fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Uses the raw file bytes as the fingerprint
pub struct ContentHasher;

impl HashAlgorithm for ContentHasher {
    fn hash_image(&self, _image: &image::DynamicImage) -> Result<Fingerprint, HashError> {
        Err(HashError::UnsupportedFormat {
            format: "content".to_string(),
        })
    }

    fn hash_file(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let bytes = fs::read(path).map_err(|e| HashError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Fingerprint::new(bytes))
    }

    fn kind(&self) -> HashAlgorithmKind {
        HashAlgorithmKind::Average
    }
}
