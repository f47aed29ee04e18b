//! File filtering logic for the scanner.

use std::collections::HashSet;
use std::path::Path;

/// Extensions accepted out of the box, without the leading dot
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Filters files to determine if they are supported images
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// File extensions to include
    extensions: HashSet<String>,
    /// Whether to include hidden files
    include_hidden: bool,
    /// Whether `IMG.JPG` counts as a `.jpg`
    case_insensitive: bool,
}

impl ImageFilter {
    /// Create a new filter with the default extensions, matched case-sensitively
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
            case_insensitive: false,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Match extensions regardless of case
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden && is_hidden(path) {
            return false;
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if self.case_insensitive => self
                .extensions
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext)),
            Some(ext) => self.extensions.contains(ext),
            None => false,
        }
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_accepted_types() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/photos/image.jpg")));
        assert!(filter.should_include(Path::new("/photos/image.jpeg")));
        assert!(filter.should_include(Path::new("/photos/image.png")));
        assert!(filter.should_include(Path::new("/photos/image.gif")));
    }

    #[test]
    fn filter_is_case_sensitive_by_default() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/IMG_1234.JPG")));
    }

    #[test]
    fn filter_can_ignore_case() {
        let filter = ImageFilter::new().with_case_insensitive(true);
        assert!(filter.should_include(Path::new("/photos/IMG_1234.JPG")));
    }

    #[test]
    fn filter_excludes_other_formats() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/document.pdf")));
        assert!(!filter.should_include(Path::new("/photos/photo.webp")));
        assert!(!filter.should_include(Path::new("/photos/photo.heic")));
    }

    #[test]
    fn filter_excludes_hidden_by_default() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/.hidden.jpg")));
    }

    #[test]
    fn filter_can_include_hidden() {
        let filter = ImageFilter::new().with_hidden(true);
        assert!(filter.should_include(Path::new("/photos/.hidden.jpg")));
    }

    #[test]
    fn custom_extensions_accept_leading_dot() {
        let filter = ImageFilter::new().with_extensions(vec![".webp".to_string()]);
        assert!(filter.should_include(Path::new("/photos/a.webp")));
        assert!(!filter.should_include(Path::new("/photos/a.jpg")));
    }

    #[test]
    fn filter_handles_no_extension() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/no_extension")));
    }
}
