//! Value records produced by the DORA store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Performance band, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerformanceClass {
    Elite,
    High,
    Medium,
    Low,
}

impl PerformanceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elite => "ELITE",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for PerformanceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Windowed Four Key Metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoraMetrics {
    /// Successful deployments per day.
    pub deployment_frequency: f64,
    /// Mean lead time of successful deployments, minutes.
    pub lead_time_minutes: f64,
    /// Share of deployments that caused an incident.
    pub change_failure_rate: f64,
    /// Mean time to recovery, minutes.
    pub mttr_minutes: f64,
    pub classification: PerformanceClass,
    pub period_days: u32,
}

impl DoraMetrics {
    /// All-zero metrics, classified LOW.
    pub fn neutral(period_days: u32) -> Self {
        Self {
            deployment_frequency: 0.0,
            lead_time_minutes: 0.0,
            change_failure_rate: 0.0,
            mttr_minutes: 0.0,
            classification: PerformanceClass::Low,
            period_days,
        }
    }
}

/// Parity vs outcome over a window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationAnalysis {
    pub insufficient_data: bool,
    pub sample_count: usize,
    pub high_parity_cutoff: f64,
    pub high_parity_deployments: usize,
    pub low_parity_deployments: usize,
    pub high_parity_failure_rate: f64,
    pub low_parity_failure_rate: f64,
    /// Pearson r between parity and success; absent when data is insufficient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_coefficient: Option<f64>,
    pub insight: String,
}

/// Success rate at or above a parity threshold vs below it, all time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParityImpact {
    pub min_parity: f64,
    pub high_count: i64,
    pub low_count: i64,
    pub high_success_rate: f64,
    pub low_success_rate: f64,
    /// `high_success_rate - low_success_rate`; 0 when either side is empty.
    pub improvement: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ParityImpact {
    pub fn is_insufficient(&self) -> bool {
        self.note.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentRecord {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub commit_sha: String,
    pub parity_score: Option<f64>,
    pub success: bool,
    pub lead_time_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentRecord {
    pub id: i64,
    /// Timestamp of the deployment the incident is attributed to.
    pub timestamp: DateTime<Utc>,
    pub deployment_id: i64,
    pub resolved_at: DateTime<Utc>,
    pub mttr_minutes: i64,
    pub caused_by_deployment: bool,
}
