use crate::domain::dependency_map::DependencyMap;
use crate::domain::ports::PathScheme;
use std::collections::HashSet;

/// Entity-level dependencies of one entity, deduplicated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityDependencies {
    /// Entities owning a key whose entries point at the subject.
    pub direct_dependencies: Vec<String>,
    /// Entities the subject's own keys point at.
    pub inverse_dependencies: Vec<String>,
}

/// Partitions a dependency map into direct and inverse dependencies of one entity.
pub struct EntityDependencyScanner<'s> {
    scheme: &'s dyn PathScheme,
    excluded_entities: &'s [String],
}

impl<'s> EntityDependencyScanner<'s> {
    /// `excluded_entities` are keys whose entity is skipped entirely (e.g. the global
    /// `appsmith` object).
    pub fn new(scheme: &'s dyn PathScheme, excluded_entities: &'s [String]) -> Self {
        Self {
            scheme,
            excluded_entities,
        }
    }

    /// Returns `None` when `entity_name` is missing or empty.
    pub fn scan(
        &self,
        deps: &DependencyMap,
        entity_name: Option<&str>,
    ) -> Option<EntityDependencies> {
        let target = entity_name.filter(|name| !name.is_empty())?;

        let mut direct = OrderedNames::default();
        let mut inverse = OrderedNames::default();

        for (dependant, dependencies) in deps.iter() {
            let entity = self.scheme.entity_name(dependant);
            if self.is_excluded(entity) {
                continue;
            }
            for dependency in dependencies {
                let entity_dependency = self.scheme.entity_name(dependency);
                if entity != target && entity_dependency == target {
                    direct.add(entity);
                } else if entity == target && entity_dependency != target {
                    inverse.add(entity_dependency);
                }
            }
        }

        Some(EntityDependencies {
            direct_dependencies: direct.names,
            inverse_dependencies: inverse.names,
        })
    }

    fn is_excluded(&self, entity: &str) -> bool {
        self.excluded_entities.iter().any(|e| e == entity)
    }
}

#[derive(Default)]
struct OrderedNames {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedNames {
    fn add(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }
}
