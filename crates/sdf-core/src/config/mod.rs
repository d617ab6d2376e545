//! Configuration system for SDF-CVF.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod blast_radius_config;
pub mod dora_config;
pub mod gate_config;
pub mod parity_config;
pub mod sdf_config;

pub use blast_radius_config::BlastRadiusConfig;
pub use dora_config::{ClassificationThresholds, DoraConfig};
pub use gate_config::{GatePolicyConfig, GatesConfig};
pub use parity_config::ParityConfig;
pub use sdf_config::{CliOverrides, SdfConfig};
