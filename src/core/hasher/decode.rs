//! Image loading through the `image` crate.
//!
//! Format detection looks at the file content, not the extension, so a
//! `.jpg` that is really a PNG still decodes.

use crate::error::HashError;
use image::{DynamicImage, ImageError, ImageReader};
use std::path::Path;

/// Open and decode an image file
pub fn open_image(path: &Path) -> Result<DynamicImage, HashError> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| HashError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

    let image = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(unsupported) => HashError::UnsupportedFormat {
            format: unsupported.to_string(),
        },
        ImageError::IoError(source) => HashError::IoError {
            path: path.to_path_buf(),
            source,
        },
        other => HashError::DecodeError {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(HashError::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn decodes_png_written_with_jpg_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("actually_png.jpg");
        let img = ImageBuffer::from_fn(4, 4, |_, _| Rgb([10u8, 20, 30]));
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();

        let image = open_image(&path).unwrap();
        assert_eq!(image.width(), 4);
    }

    #[test]
    fn garbage_content_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.png");
        fs::write(&path, b"this is not a valid image file").unwrap();

        assert!(open_image(&path).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = open_image(Path::new("/nonexistent/photo.png"));
        assert!(matches!(result, Err(HashError::IoError { .. })));
    }
}
