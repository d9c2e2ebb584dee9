use crate::domain::chain::Chain;
use crate::domain::dependency_map::DependencyMap;
use crate::domain::path::PropertyPath;
use crate::domain::ports::PathScheme;
use std::collections::HashSet;
use std::slice;

/// Resolves the transitive dependents of a property path from an inverse dependency map.
///
/// A dependent is recorded unless it is a child property of the entity currently being
/// expanded; it is then expanded itself unless it names that entity. Both tests are local to
/// each expansion level, not to the root.
///
/// The walk is a depth-first worklist that expands every path at most once, so cyclic maps
/// terminate. On acyclic maps the chain (content and order) is the same as a plain recursive
/// expansion followed by order-preserving union at each level.
pub struct DependencyChainResolver<'s> {
    scheme: &'s dyn PathScheme,
}

/// One in-progress expansion.
struct Frame<'m> {
    path: &'m str,
    entity: &'m str,
    dependents: slice::Iter<'m, PropertyPath>,
}

impl<'s> DependencyChainResolver<'s> {
    pub fn new(scheme: &'s dyn PathScheme) -> Self {
        Self { scheme }
    }

    /// Dependency chain of a single property path.
    ///
    /// Unknown paths and paths without dependents yield an empty chain.
    pub fn resolve(&self, property_path: &str, inverse_map: &DependencyMap) -> Chain {
        let mut chain = Chain::new();
        self.resolve_into(property_path, inverse_map, &mut chain);
        chain
    }

    /// Union of the chains of `paths`, in the given order.
    pub fn resolve_all<P: AsRef<str>>(
        &self,
        paths: &[P],
        inverse_map: &DependencyMap,
    ) -> Chain {
        let mut chain = Chain::new();
        for path in paths {
            self.resolve_into(path.as_ref(), inverse_map, &mut chain);
        }
        chain
    }

    fn resolve_into<'m>(
        &self,
        root: &'m str,
        inverse_map: &'m DependencyMap,
        chain: &mut Chain,
    ) {
        let Some(root_frame) = self.frame(root, inverse_map) else {
            return;
        };

        let mut expanded: HashSet<&str> = HashSet::new();
        expanded.insert(root);
        let mut stack = vec![root_frame];

        while let Some(frame) = stack.last_mut() {
            let Some(dependent) = frame.dependents.next() else {
                stack.pop();
                continue;
            };
            let dependent = dependent.as_str();
            let entity = frame.entity;

            if !self.scheme.is_child_property_path(entity, dependent) {
                chain.insert(dependent);
            }

            if dependent == entity {
                continue;
            }

            if !expanded.insert(dependent) {
                if stack.iter().any(|f| f.path == dependent) {
                    tracing::debug!(root, dependent, "back edge in dependency map, not expanding");
                }
                continue;
            }

            if let Some(next) = self.frame(dependent, inverse_map) {
                stack.push(next);
            }
        }
    }

    fn frame<'m>(&self, path: &'m str, inverse_map: &'m DependencyMap) -> Option<Frame<'m>> {
        let dependents = inverse_map.get(path).filter(|deps| !deps.is_empty())?;
        Some(Frame {
            path,
            entity: self.scheme.entity_name(path),
            dependents: dependents.iter(),
        })
    }
}
