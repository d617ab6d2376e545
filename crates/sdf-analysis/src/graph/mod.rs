//! Import graph and blast-radius analysis.
//!
//! Nodes are Python modules keyed by dotted name; an edge `A → B` means
//! A imports B. The blast radius of a change is everything that reaches
//! a changed module along those edges.

pub mod blast_radius;
pub mod builder;
pub mod imports;
pub mod module_key;
pub mod types;

pub use blast_radius::{analyze_blast_radius, BlastRadiusAnalyzer, BlastRadiusResult};
pub use builder::ImportGraphBuilder;
pub use imports::{ImportExtractor, ImportRef};
pub use module_key::{module_key_for, path_to_module_key};
pub use types::{GraphStats, ImportEdge, ImportGraph, ModuleNode};
