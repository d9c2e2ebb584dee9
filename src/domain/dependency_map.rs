use crate::domain::path::PropertyPath;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Ordered map from a property path to the paths that depend on it.
///
/// Entries keep insertion order (document order when deserialized), because entry-scanning
/// queries report results in the order entries are visited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    entries: Vec<(PropertyPath, Vec<PropertyPath>)>,
    index: HashMap<PropertyPath, usize>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the dependents of `path`.
    ///
    /// Replacing keeps the original entry position. Returns the previous dependents, if any.
    pub fn insert(
        &mut self,
        path: impl Into<PropertyPath>,
        dependents: Vec<PropertyPath>,
    ) -> Option<Vec<PropertyPath>> {
        let path = path.into();
        if let Some(&pos) = self.index.get(&path) {
            return Some(std::mem::replace(&mut self.entries[pos].1, dependents));
        }
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, dependents));
        None
    }

    /// Append a single dependent to `path`, creating the entry when missing.
    pub fn push_dependent(
        &mut self,
        path: impl Into<PropertyPath>,
        dependent: impl Into<PropertyPath>,
    ) {
        let path = path.into();
        let dependent = dependent.into();
        match self.index.get(&path) {
            Some(&pos) => self.entries[pos].1.push(dependent),
            None => {
                self.insert(path, vec![dependent]);
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&[PropertyPath]> {
        self.index
            .get(path)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PropertyPath])> {
        self.entries
            .iter()
            .map(|(path, dependents)| (path.as_str(), dependents.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    /// Number of keyed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of `path -> dependent` pairs, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|(_, deps)| deps.len()).sum()
    }
}

impl<K, V, D> FromIterator<(K, V)> for DependencyMap
where
    K: Into<PropertyPath>,
    V: IntoIterator<Item = D>,
    D: Into<PropertyPath>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, dependents) in iter {
            map.insert(path, dependents.into_iter().map(Into::into).collect());
        }
        map
    }
}

impl Serialize for DependencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, dependents) in &self.entries {
            map.serialize_entry(path, dependents)?;
        }
        map.end()
    }
}

struct DependencyMapVisitor;

impl<'de> Visitor<'de> for DependencyMapVisitor {
    type Value = DependencyMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping property paths to arrays of dependent paths")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = DependencyMap::new();
        while let Some((path, dependents)) =
            access.next_entry::<PropertyPath, Vec<PropertyPath>>()?
        {
            if map.contains_key(&path) {
                tracing::warn!(path = %path, "duplicate key in dependency map; keeping last value");
            }
            map.insert(path, dependents);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for DependencyMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DependencyMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = DependencyMap::new();
        map.insert("A.x", vec!["B.y".into()]);
        map.insert("C.z", vec![]);
        let prev = map.insert("A.x", vec!["D.w".into()]);

        assert_eq!(prev, Some(vec!["B.y".to_string()]));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["A.x", "C.z"]);
        assert_eq!(map.get("A.x").unwrap(), ["D.w".to_string()]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_push_dependent_creates_entry() {
        let mut map = DependencyMap::new();
        map.push_dependent("A.x", "B.y");
        map.push_dependent("A.x", "C.z");
        assert_eq!(map.get("A.x").unwrap().len(), 2);
        assert_eq!(map.edge_count(), 2);
        assert!(map.get("B.y").is_none());
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let json = r#"{"Z.a": ["A.b"], "A.b": [], "M.c": ["Z.a", "A.b"]}"#;
        let map: DependencyMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Z.a", "A.b", "M.c"]);
        assert_eq!(map.edge_count(), 3);
    }

    #[test]
    fn test_deserialize_duplicate_key_last_value_first_position() {
        let json = r#"{"A.x": ["B.y"], "C.z": [], "A.x": ["D.w"]}"#;
        let map: DependencyMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["A.x", "C.z"]);
        assert_eq!(map.get("A.x").unwrap(), ["D.w".to_string()]);
    }

    #[test]
    fn test_deserialize_rejects_non_array_values() {
        let json = r#"{"A.x": "B.y"}"#;
        assert!(serde_json::from_str::<DependencyMap>(json).is_err());
    }

    #[test]
    fn test_serialize_as_object() {
        let map: DependencyMap = [("A.x", vec!["B.y"]), ("B.y", vec![])]
            .into_iter()
            .collect();
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value, serde_json::json!({"A.x": ["B.y"], "B.y": []}));
    }
}
