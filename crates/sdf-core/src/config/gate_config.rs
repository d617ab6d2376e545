//! Parity gate configuration.
//!
//! Each gate kind has compiled defaults; these tables only carry
//! operator overrides, applied field by field.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Optional overrides for one gate kind.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GatePolicyConfig {
    pub parity_threshold: Option<f64>,
    pub require_complete_quartet: Option<bool>,
    pub allow_override: Option<bool>,
    pub strict_mode: Option<bool>,
}

impl GatePolicyConfig {
    /// Merge `other` on top of `self`, field by field.
    pub fn merge_from(&mut self, other: &GatePolicyConfig) {
        if other.parity_threshold.is_some() {
            self.parity_threshold = other.parity_threshold;
        }
        if other.require_complete_quartet.is_some() {
            self.require_complete_quartet = other.require_complete_quartet;
        }
        if other.allow_override.is_some() {
            self.allow_override = other.allow_override;
        }
        if other.strict_mode.is_some() {
            self.strict_mode = other.strict_mode;
        }
    }
}

/// Configuration for the gates subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GatesConfig {
    /// Threshold used by the installed pre-commit hook. Default: 0.70.
    pub hook_threshold: Option<f64>,
    pub pre_commit: GatePolicyConfig,
    pub pre_push: GatePolicyConfig,
    pub pull_request: GatePolicyConfig,
    pub deployment: GatePolicyConfig,
}

impl GatesConfig {
    /// Returns the effective hook threshold, defaulting to 0.70.
    pub fn effective_hook_threshold(&self) -> f64 {
        self.hook_threshold.unwrap_or(constants::DEFAULT_HOOK_THRESHOLD)
    }

    /// All per-kind policy tables with their TOML names.
    pub fn policies(&self) -> [(&'static str, &GatePolicyConfig); 4] {
        [
            ("pre_commit", &self.pre_commit),
            ("pre_push", &self.pre_push),
            ("pull_request", &self.pull_request),
            ("deployment", &self.deployment),
        ]
    }
}
