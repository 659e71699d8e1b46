//! Visited set for crawl de-duplication

use std::collections::HashSet;
use url::Url;

/// Canonical URLs already processed by one traversal
///
/// Entries are write-once and the check-and-insert in [`VisitedSet::insert`]
/// is a single operation, so the same URL can never be admitted twice even
/// when it is discovered from several pages. Iteration yields URLs in the
/// order they were visited.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    seen: HashSet<String>,
    order: Vec<Url>,
}

impl VisitedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as visited
    ///
    /// Returns false if it was already present.
    pub fn insert(&mut self, url: &Url) -> bool {
        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }
        self.order.push(url.clone());
        true
    }

    /// Whether `url` has been visited
    pub fn contains(&self, url: &Url) -> bool {
        self.seen.contains(url.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visited URLs in visit order
    pub fn iter(&self) -> impl Iterator<Item = &Url> {
        self.order.iter()
    }

    /// Consumes the set, returning URLs in visit order
    pub fn into_vec(self) -> Vec<Url> {
        self.order
    }
}
