//! The set of candidates eligible for update checks.

use crate::{PackageCandidate, PackageId};
use std::collections::HashSet;
use std::sync::Arc;

/// Candidates confirmed available on the remote repository.
///
/// Built once per scan and immutable afterwards. Clones share the same
/// backing storage, so downstream consumers hold a reference rather than a
/// copy of the scan result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckableSet {
    candidates: Arc<[PackageCandidate]>,
}

impl CheckableSet {
    /// Builds a checkable set, keeping the first occurrence of every id.
    ///
    /// Iteration order of `available` is preserved.
    #[must_use]
    pub fn new(available: impl IntoIterator<Item = PackageCandidate>) -> Self {
        let mut seen = HashSet::new();
        let candidates: Vec<PackageCandidate> = available
            .into_iter()
            .filter(|candidate| seen.insert(candidate.id().clone()))
            .collect();

        Self {
            candidates: candidates.into(),
        }
    }

    /// Returns true if no candidate is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the number of available candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if a candidate with the given id is in the set.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.candidates.iter().any(|c| c.id().as_str() == id)
    }

    /// Looks up a candidate by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PackageCandidate> {
        self.candidates.iter().find(|c| c.id().as_str() == id)
    }

    /// Returns all candidates as an iterator.
    pub fn iter(&self) -> impl Iterator<Item = &PackageCandidate> {
        self.candidates.iter()
    }

    /// Returns the identifiers of all candidates.
    pub fn ids(&self) -> impl Iterator<Item = &PackageId> {
        self.candidates.iter().map(PackageCandidate::id)
    }

    /// Returns the candidates as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[PackageCandidate] {
        &self.candidates
    }
}

impl<'a> IntoIterator for &'a CheckableSet {
    type Item = &'a PackageCandidate;
    type IntoIter = std::slice::Iter<'a, PackageCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = CheckableSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains("nucleus"));
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let set = CheckableSet::new(vec![
            PackageCandidate::new("nucleus", "Nucleus"),
            PackageCandidate::new("luckperms", "LuckPerms"),
            PackageCandidate::new("nucleus", "Nucleus (again)"),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("nucleus").unwrap().name(), "Nucleus");
        assert!(set.contains("luckperms"));
    }

    #[test]
    fn test_clones_share_storage() {
        let set = CheckableSet::new(vec![PackageCandidate::new("nucleus", "Nucleus")]);
        let shared = set.clone();
        assert!(std::ptr::eq(set.as_slice(), shared.as_slice()));
    }

    #[test]
    fn test_order_is_preserved() {
        let set = CheckableSet::new(vec![
            PackageCandidate::new("b", "B"),
            PackageCandidate::new("a", "A"),
        ]);
        let ids: Vec<_> = set.ids().map(PackageId::as_str).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
