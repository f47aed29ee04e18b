//! Directories excluded from every traversal.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Set of directory paths the walker never enters.
///
/// Built once before a run starts and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct SkipSet {
    paths: HashSet<PathBuf>,
}

impl SkipSet {
    /// An empty skip set
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the given subdirectory names of `root`
    pub fn from_names<I, S>(root: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .fold(Self::new(), |set, name| set.with_path(root.join(name.as_ref())))
    }

    /// Add an absolute directory path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(path.into());
        self
    }

    /// Whether `path` is one of the skipped directories
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_joined_onto_root() {
        let skip = SkipSet::from_names(Path::new("/photos"), ["1", "raw"]);

        assert!(skip.contains(Path::new("/photos/1")));
        assert!(skip.contains(Path::new("/photos/raw")));
        assert!(!skip.contains(Path::new("/photos/2")));
        assert_eq!(skip.len(), 2);
    }

    #[test]
    fn nested_names_do_not_match_elsewhere() {
        let skip = SkipSet::from_names(Path::new("/photos"), ["raw"]);
        assert!(!skip.contains(Path::new("/photos/2024/raw")));
    }

    #[test]
    fn with_path_adds_absolute_paths() {
        let skip = SkipSet::new().with_path("/photos~duplicates");
        assert!(skip.contains(Path::new("/photos~duplicates")));
        assert!(!skip.is_empty());
    }
}
