//! Blast-radius analyzer configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BlastRadiusConfig {
    /// Factor above which a change set is high impact. Default: 5.0.
    pub high_impact_threshold: Option<f64>,
    /// Directory names skipped during the repository walk.
    #[serde(default)]
    pub excluded_dirs: Vec<String>,
    /// Honour `.gitignore` while walking. Default: true.
    pub respect_gitignore: Option<bool>,
}

impl BlastRadiusConfig {
    pub fn effective_high_impact_threshold(&self) -> f64 {
        self.high_impact_threshold
            .unwrap_or(constants::DEFAULT_HIGH_IMPACT_THRESHOLD)
    }

    /// Configured exclusions, or the built-in cache/vendor directory list.
    pub fn effective_excluded_dirs(&self) -> Vec<String> {
        if self.excluded_dirs.is_empty() {
            constants::DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|d| d.to_string())
                .collect()
        } else {
            self.excluded_dirs.clone()
        }
    }

    pub fn effective_respect_gitignore(&self) -> bool {
        self.respect_gitignore.unwrap_or(true)
    }
}
