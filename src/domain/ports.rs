use crate::domain::dependency_map::DependencyMap;
use crate::domain::path::EntityPath;
use anyhow::Result;

/// Dependency map source port (implemented by Infrastructure)
pub trait DependencyMapSource: Send + Sync {
    fn load(&self) -> Result<DependencyMap>;

    /// Human-readable origin of the map, used in health reports.
    fn describe(&self) -> String;
}

/// Binding path rules port.
///
/// Both operations must be pure string predicates: the resolver calls them once per edge.
pub trait PathScheme: Send + Sync {
    /// Split `path` into `(entityName, propertyPath)`.
    fn split<'p>(&self, path: &'p str) -> EntityPath<'p>;

    /// Whether `candidate` is `parent` itself or one of its nested properties.
    fn is_child_property_path(&self, parent: &str, candidate: &str) -> bool;

    fn entity_name<'p>(&self, path: &'p str) -> &'p str {
        self.split(path).entity_name
    }
}
