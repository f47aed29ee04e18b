//! # Registry Module
//!
//! Tracks which canonical names were already handed out during a run.
//!
//! The registry is the only oracle the rename pass uses to spot duplicates
//! that live in different directories: if two files hash to the same
//! canonical name, whichever is visited second finds the name taken.
//!
//! It is insertion-only. A fresh registry is created for every run, so
//! running the rename pass again over an unchanged tree claims every name
//! exactly once and moves nothing.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Run-scoped set of claimed canonical names
#[derive(Debug, Default)]
pub struct NameRegistry {
    names: Mutex<HashSet<String>>,
}

impl NameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim `name`.
    ///
    /// Returns `true` if the name was free and is now owned by the caller,
    /// `false` if an earlier file already holds it.
    pub fn claim(&self, name: &str) -> bool {
        let mut names = self.lock();
        if names.contains(name) {
            return false;
        }
        names.insert(name.to_string())
    }

    /// Whether `name` has been claimed
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// Number of claimed names
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        // A panic while holding the lock cannot leave the set half-updated
        self.names
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn first_claim_wins() {
        let registry = NameRegistry::new();

        assert!(registry.claim("ffd8c0c0e0f0f8fc.jpg"));
        assert!(!registry.claim("ffd8c0c0e0f0f8fc.jpg"));
        assert!(registry.contains("ffd8c0c0e0f0f8fc.jpg"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn extension_is_part_of_the_name() {
        let registry = NameRegistry::new();

        assert!(registry.claim("ffd8c0c0e0f0f8fc.jpg"));
        assert!(registry.claim("ffd8c0c0e0f0f8fc.png"));
    }

    #[test]
    fn concurrent_claims_have_exactly_one_winner() {
        let registry = Arc::new(NameRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.claim("0000000000000000.png"))
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
    }

    #[test]
    fn new_registry_is_empty() {
        assert!(NameRegistry::new().is_empty());
    }
}
