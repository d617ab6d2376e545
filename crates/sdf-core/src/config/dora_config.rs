//! DORA store configuration, including the performance band thresholds.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Band thresholds for ELITE / HIGH / MEDIUM classification.
///
/// Frequencies are deployments per day; durations are minutes.
/// MEDIUM has no MTTR bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassificationThresholds {
    pub elite_min_frequency: f64,
    pub elite_max_lead_time: f64,
    pub elite_max_failure_rate: f64,
    pub elite_max_mttr: f64,
    pub high_min_frequency: f64,
    pub high_max_lead_time: f64,
    pub high_max_failure_rate: f64,
    pub high_max_mttr: f64,
    pub medium_min_frequency: f64,
    pub medium_max_lead_time: f64,
    pub medium_max_failure_rate: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            elite_min_frequency: 1.0,
            elite_max_lead_time: constants::MINUTES_PER_HOUR,
            elite_max_failure_rate: 0.15,
            elite_max_mttr: constants::MINUTES_PER_HOUR,
            high_min_frequency: 1.0 / 7.0,
            high_max_lead_time: constants::MINUTES_PER_WEEK,
            high_max_failure_rate: 0.30,
            high_max_mttr: constants::MINUTES_PER_DAY,
            medium_min_frequency: 1.0 / 30.0,
            medium_max_lead_time: constants::MINUTES_PER_SIX_MONTHS,
            medium_max_failure_rate: 0.45,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DoraConfig {
    /// Metrics database path, relative to the repository root unless absolute.
    pub db_path: Option<String>,
    /// Metrics window in days. Default: 30.
    pub window_days: Option<u32>,
    /// Correlation window in days. Default: 90.
    pub correlation_window_days: Option<u32>,
    /// Parity strictly above this is the high cohort. Default: 0.85.
    pub high_parity_cutoff: Option<f64>,
    /// Deployments required before correlating. Default: 10.
    pub min_correlation_samples: Option<usize>,
    pub classification: ClassificationThresholds,
}

impl DoraConfig {
    pub fn effective_db_path(&self) -> &str {
        self.db_path
            .as_deref()
            .unwrap_or(constants::DEFAULT_DORA_DB_PATH)
    }

    pub fn effective_window_days(&self) -> u32 {
        self.window_days.unwrap_or(constants::DEFAULT_WINDOW_DAYS)
    }

    pub fn effective_correlation_window_days(&self) -> u32 {
        self.correlation_window_days
            .unwrap_or(constants::DEFAULT_CORRELATION_WINDOW_DAYS)
    }

    pub fn effective_high_parity_cutoff(&self) -> f64 {
        self.high_parity_cutoff
            .unwrap_or(constants::DEFAULT_HIGH_PARITY_CUTOFF)
    }

    pub fn effective_min_correlation_samples(&self) -> usize {
        self.min_correlation_samples
            .unwrap_or(constants::DEFAULT_MIN_CORRELATION_SAMPLES)
    }
}
