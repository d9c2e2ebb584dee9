/// Dot-addressed identifier of an entity's field, e.g. `Api1.data`.
pub type PropertyPath = String;

/// A property path split into its owning entity and the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityPath<'a> {
    pub entity_name: &'a str,
    /// Empty when the path names the entity itself.
    pub property_path: &'a str,
}

impl<'a> EntityPath<'a> {
    pub fn new(entity_name: &'a str, property_path: &'a str) -> Self {
        Self {
            entity_name,
            property_path,
        }
    }

    pub fn is_entity(&self) -> bool {
        self.property_path.is_empty()
    }
}
