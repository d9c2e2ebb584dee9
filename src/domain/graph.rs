use crate::domain::dependency_map::DependencyMap;
use crate::domain::path::PropertyPath;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Graph view of a dependency map: one node per distinct path, one edge per
/// `path -> dependent` pair.
pub struct DependencyGraph {
    pub graph: DiGraph<PropertyPath, ()>,

    /// Mapping from path to node index
    pub path_to_node: HashMap<PropertyPath, NodeIndex>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            path_to_node: HashMap::new(),
        }
    }

    pub fn from_map(map: &DependencyMap) -> Self {
        let mut g = Self::new();
        for (path, dependents) in map.iter() {
            let source = g.get_or_create_node(path);
            for dependent in dependents {
                let target = g.get_or_create_node(dependent);
                g.graph.add_edge(source, target, ());
            }
        }
        g
    }

    fn get_or_create_node(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.path_to_node.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path.to_string());
        self.path_to_node.insert(path.to_string(), idx);
        idx
    }

    pub fn get_node_by_path(&self, path: &str) -> Option<NodeIndex> {
        self.path_to_node.get(path).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Dependency cycles: strongly connected components with more than one path, plus
    /// self-references.
    ///
    /// Paths inside a cycle are sorted; cycles are sorted by their first path.
    pub fn cycles(&self) -> Vec<Vec<PropertyPath>> {
        let mut cycles: Vec<Vec<PropertyPath>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || self.graph.find_edge(scc[0], scc[0]).is_some()
            })
            .map(|scc| {
                let mut paths: Vec<PropertyPath> =
                    scc.into_iter().map(|idx| self.graph[idx].clone()).collect();
                paths.sort();
                paths
            })
            .collect();
        cycles.sort();
        cycles
    }
}
