use crate::domain::path::EntityPath;
use crate::domain::ports::PathScheme;

/// Binding path rules of the builder's data tree.
///
/// - `Entity.prop.nested` splits at the first `.` into `("Entity", "prop.nested")`
/// - a path with no `.` is the entity itself
/// - children of `p` are `p`, `p.*` and `p[*]`
#[derive(Debug, Clone, Copy, Default)]
pub struct DotPathScheme;

impl DotPathScheme {
    pub fn new() -> Self {
        Self
    }
}

impl PathScheme for DotPathScheme {
    fn split<'p>(&self, path: &'p str) -> EntityPath<'p> {
        match path.split_once('.') {
            Some((entity_name, property_path)) => EntityPath::new(entity_name, property_path),
            None => EntityPath::new(path, ""),
        }
    }

    fn is_child_property_path(&self, parent: &str, candidate: &str) -> bool {
        match candidate.strip_prefix(parent) {
            Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
            None => false,
        }
    }
}
