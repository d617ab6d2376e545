//! Fixed-layout text report of the metrics and, when there is enough data,
//! the parity correlation.

use std::fmt::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sdf_core::config::DoraConfig;
use sdf_core::errors::StorageError;

use super::store::DoraStore;
use super::types::{CorrelationAnalysis, DoraMetrics};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoraReport {
    pub metrics: DoraMetrics,
    pub correlation: CorrelationAnalysis,
}

impl DoraReport {
    /// Metrics over the `days` window ending now, correlation over the
    /// store's configured correlation window.
    pub fn collect(store: &DoraStore, days: u32) -> Result<Self, StorageError> {
        Self::collect_at(store, Utc::now(), days)
    }

    pub fn collect_at(
        store: &DoraStore,
        now: DateTime<Utc>,
        days: u32,
    ) -> Result<Self, StorageError> {
        let correlation_days = store.config().effective_correlation_window_days();
        Ok(Self {
            metrics: store.calculate_dora_metrics_at(now, days)?,
            correlation: store.analyze_correlation_at(now, correlation_days)?,
        })
    }
}

pub fn render_report(report: &DoraReport) -> String {
    let m = &report.metrics;
    let mut out = String::new();
    let _ = writeln!(out, "=== DORA Metrics ({} days) ===", m.period_days);
    let _ = writeln!(out, "Classification: {}", m.classification);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "1. Deployment Frequency: {:.2} per day",
        m.deployment_frequency
    );
    let _ = writeln!(
        out,
        "2. Lead Time for Changes: {:.0} minutes",
        m.lead_time_minutes
    );
    let _ = writeln!(
        out,
        "3. Change Failure Rate: {:.1}%",
        m.change_failure_rate * 100.0
    );
    let _ = writeln!(out, "4. Mean Time to Recovery: {:.0} minutes", m.mttr_minutes);

    let c = &report.correlation;
    if !c.insufficient_data {
        let cutoff = c.high_parity_cutoff;
        let _ = writeln!(out);
        let _ = writeln!(out, "=== Parity Correlation ===");
        let _ = writeln!(
            out,
            "High parity (>{cutoff}): {} deployments, {:.1}% failures",
            c.high_parity_deployments,
            c.high_parity_failure_rate * 100.0
        );
        let _ = writeln!(
            out,
            "Low parity (≤{cutoff}): {} deployments, {:.1}% failures",
            c.low_parity_deployments,
            c.low_parity_failure_rate * 100.0
        );
        let _ = writeln!(
            out,
            "Correlation coefficient: {:.3}",
            c.correlation_coefficient.unwrap_or(0.0)
        );
        let _ = writeln!(out, "Insight: {}", c.insight);
    }
    out
}

/// Open the store at `db_path` and render the report for `days`.
pub fn report_dora_metrics(
    db_path: &Path,
    config: &DoraConfig,
    days: u32,
) -> Result<String, StorageError> {
    let store = DoraStore::open(db_path, config)?;
    Ok(render_report(&DoraReport::collect(&store, days)?))
}
