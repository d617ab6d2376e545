//! Blast radius: what else a change set transitively affects.

use std::path::{Path, PathBuf};

use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

use sdf_core::config::BlastRadiusConfig;
use sdf_core::errors::GraphError;
use sdf_core::types::collections::FxHashSet;

use super::builder::ImportGraphBuilder;
use super::module_key::module_key_for;
use super::types::{GraphStats, ImportGraph};

/// Impact estimate for one change set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastRadiusResult {
    pub changed_files: Vec<String>,
    /// Distinct changed modules.
    pub directly_affected: usize,
    /// Affected modules that were not themselves changed.
    pub transitively_affected: usize,
    pub total_affected: usize,
    /// Files of affected modules that exist in the graph, sorted.
    pub affected_files: Vec<String>,
    /// `total / direct`, or 0 when nothing was changed.
    pub blast_radius_factor: f64,
}

impl BlastRadiusResult {
    /// True iff the factor exceeds `threshold`.
    pub fn is_high_impact(&self, threshold: f64) -> bool {
        self.blast_radius_factor > threshold
    }
}

/// Answers impact queries over a repository's import graph.
pub struct BlastRadiusAnalyzer {
    root: PathBuf,
    graph: ImportGraph,
    high_impact_threshold: f64,
}

impl BlastRadiusAnalyzer {
    /// Build the graph for `root` with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, GraphError> {
        Self::from_config(root, &BlastRadiusConfig::default())
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &BlastRadiusConfig) -> Result<Self, GraphError> {
        let root = root.into();
        let graph = ImportGraphBuilder::new(root.clone(), config)?.build()?;
        Ok(Self {
            root,
            graph,
            high_impact_threshold: config.effective_high_impact_threshold(),
        })
    }

    /// Wrap an already-built graph.
    pub fn from_graph(root: impl Into<PathBuf>, graph: ImportGraph) -> Self {
        Self {
            root: root.into(),
            graph,
            high_impact_threshold: BlastRadiusConfig::default().effective_high_impact_threshold(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn graph(&self) -> &ImportGraph {
        &self.graph
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }

    pub fn high_impact_threshold(&self) -> f64 {
        self.high_impact_threshold
    }

    /// Whether `result` exceeds the configured high-impact threshold.
    pub fn is_high_impact(&self, result: &BlastRadiusResult) -> bool {
        result.is_high_impact(self.high_impact_threshold)
    }

    /// Everything that depends on `changed_files`, transitively.
    ///
    /// Every changed module is a seed, whether or not it is in the graph.
    /// Seeds outside the graph contribute only themselves.
    pub fn calculate_blast_radius<S: AsRef<str>>(&self, changed_files: &[S]) -> BlastRadiusResult {
        let changed: Vec<String> = changed_files.iter().map(|f| f.as_ref().to_string()).collect();

        let seeds: FxHashSet<String> = changed
            .iter()
            .map(|f| module_key_for(&self.root, f))
            .collect();

        let mut affected: FxHashSet<NodeIndex> = FxHashSet::default();
        let mut affected_outside = 0usize;
        for seed in &seeds {
            match self.graph.get_node(seed) {
                Some(idx) => {
                    affected.insert(idx);
                    affected.extend(self.graph.dependents(idx));
                }
                None => affected_outside += 1,
            }
        }

        let direct = seeds.len();
        let total = affected.len() + affected_outside;
        let factor = if direct > 0 {
            total as f64 / direct as f64
        } else {
            0.0
        };

        tracing::debug!(direct, total, factor, "blast radius calculated");

        BlastRadiusResult {
            changed_files: changed,
            directly_affected: direct,
            transitively_affected: total - direct,
            total_affected: total,
            affected_files: self.graph.paths_of(affected),
            blast_radius_factor: factor,
        }
    }

    /// Files that transitively import `file`, sorted.
    pub fn get_dependents(&self, file: &str) -> Vec<String> {
        match self.graph.get_node(&module_key_for(&self.root, file)) {
            Some(idx) => self.graph.paths_of(self.graph.dependents(idx)),
            None => Vec::new(),
        }
    }

    /// Files `file` transitively imports, sorted. Modules without a file
    /// (stdlib, third-party) are omitted.
    pub fn get_dependencies(&self, file: &str) -> Vec<String> {
        match self.graph.get_node(&module_key_for(&self.root, file)) {
            Some(idx) => self.graph.paths_of(self.graph.dependencies(idx)),
            None => Vec::new(),
        }
    }
}

/// Build the graph for `root` and answer one query.
pub fn analyze_blast_radius<S: AsRef<str>>(
    changed_files: &[S],
    root: impl Into<PathBuf>,
) -> Result<BlastRadiusResult, GraphError> {
    Ok(BlastRadiusAnalyzer::new(root)?.calculate_blast_radius(changed_files))
}
