use crate::domain::path::PropertyPath;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// Order-preserving set of property paths (first-seen order, no duplicates).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    paths: Vec<PropertyPath>,
    seen: HashSet<PropertyPath>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when `path` was already present.
    pub fn insert(&mut self, path: &str) -> bool {
        if self.seen.contains(path) {
            return false;
        }
        self.seen.insert(path.to_string());
        self.paths.push(path.to_string());
        true
    }

    /// Set union, appending unseen paths of `other` in its order.
    pub fn union(&mut self, other: &Chain) {
        for path in &other.paths {
            self.insert(path);
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[PropertyPath] {
        &self.paths
    }

    pub fn into_vec(self) -> Vec<PropertyPath> {
        self.paths
    }
}

impl<'a> FromIterator<&'a str> for Chain {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut chain = Self::new();
        for path in iter {
            chain.insert(path);
        }
        chain
    }
}

impl Serialize for Chain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.paths.serialize(serializer)
    }
}
