//! Import graph types.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use sdf_core::types::collections::{FxHashMap, FxHashSet};

/// One module in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleNode {
    /// Dotted module key, e.g. `pkg.sub.mod`.
    pub key: String,
    /// Source file, when the module was discovered on disk.
    /// Imported third-party modules have none.
    pub path: Option<String>,
}

/// `A → B`: A imports B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdge {
    /// 1-based line of the import statement in the importing file.
    pub line: u32,
}

/// Summary counts for a built graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub modules: usize,
    pub edges: usize,
    /// Modules backed by a file on disk.
    pub files: usize,
}

/// Directed module import graph.
#[derive(Debug, Default)]
pub struct ImportGraph {
    pub graph: StableGraph<ModuleNode, ImportEdge>,
    index: FxHashMap<String, NodeIndex>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node for `key`, created without a path if absent.
    pub fn ensure_node(&mut self, key: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(key) {
            return idx;
        }
        let idx = self.graph.add_node(ModuleNode {
            key: key.to_string(),
            path: None,
        });
        self.index.insert(key.to_string(), idx);
        idx
    }

    /// Record the source file for `key`, creating the node if needed.
    pub fn set_path(&mut self, key: &str, path: impl Into<String>) -> NodeIndex {
        let idx = self.ensure_node(key);
        self.graph[idx].path = Some(path.into());
        idx
    }

    /// Add `from → to`, creating missing nodes. Duplicate edges collapse.
    pub fn add_import(&mut self, from: &str, to: &str, line: u32) {
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        self.graph.update_edge(a, b, ImportEdge { line });
    }

    pub fn get_node(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&ModuleNode> {
        self.graph.node_weight(idx)
    }

    /// Whether `key` has a recorded source file.
    pub fn has_path(&self, key: &str) -> bool {
        self.get_node(key)
            .and_then(|idx| self.graph[idx].path.as_ref())
            .is_some()
    }

    pub fn module_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            modules: self.module_count(),
            edges: self.edge_count(),
            files: self
                .graph
                .node_indices()
                .filter(|&idx| self.graph[idx].path.is_some())
                .count(),
        }
    }

    /// Every node that transitively imports `start` (modules that depend on it).
    pub fn dependents(&self, start: NodeIndex) -> Vec<NodeIndex> {
        self.reachable(start, Direction::Incoming)
    }

    /// Every node `start` transitively imports.
    pub fn dependencies(&self, start: NodeIndex) -> Vec<NodeIndex> {
        self.reachable(start, Direction::Outgoing)
    }

    /// BFS from `start` in `direction`, excluding `start` itself.
    fn reachable(&self, start: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut visited = FxHashSet::default();
        let mut queue = std::collections::VecDeque::new();
        let mut result = Vec::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            for next in self.graph.neighbors_directed(node, direction) {
                if visited.insert(next) {
                    result.push(next);
                    queue.push_back(next);
                }
            }
        }
        result
    }

    /// Recorded file paths for `nodes`, sorted. Nodes without a path are dropped.
    pub fn paths_of(&self, nodes: impl IntoIterator<Item = NodeIndex>) -> Vec<String> {
        let mut paths: Vec<String> = nodes
            .into_iter()
            .filter_map(|idx| self.graph.node_weight(idx))
            .filter_map(|n| n.path.clone())
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_terminates_and_excludes_start() {
        let mut g = ImportGraph::new();
        g.add_import("a", "b", 1);
        g.add_import("b", "a", 1);
        let a = g.get_node("a").unwrap();
        let b = g.get_node("b").unwrap();
        assert_eq!(g.dependents(a), vec![b]);
        assert_eq!(g.dependencies(a), vec![b]);
    }

    #[test]
    fn test_duplicate_imports_collapse() {
        let mut g = ImportGraph::new();
        g.add_import("a", "b", 1);
        g.add_import("a", "b", 7);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.module_count(), 2);
        assert_eq!(g.stats().files, 0);
    }
}
