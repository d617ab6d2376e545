//! # sdf-analysis
//!
//! The analysis side of SDF-CVF: quartet detection, parity scoring,
//! import-graph blast radius, parity gates, and staged-file discovery.
//! Everything here is synchronous and side-effect free apart from
//! reading files under the repository root.

pub mod gates;
pub mod graph;
pub mod parity;
pub mod quartet;
pub mod vcs;

pub use gates::{GateConfig, GateKind, GateResult, ParityGate};
pub use graph::{BlastRadiusAnalyzer, BlastRadiusResult, ImportGraph};
pub use parity::{Embedder, FallbackEmbedder, ParityCalculator, ParityResult};
pub use quartet::{FileClassification, Quartet, QuartetDetector};
