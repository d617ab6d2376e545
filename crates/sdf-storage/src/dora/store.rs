//! DoraStore: records deployments and incidents, answers windowed queries.
//!
//! Every public operation is one transaction. Writes go through the single
//! writer; reads run in a read transaction so all of their queries see the
//! same snapshot.

use std::path::Path;

use chrono::{DateTime, Utc};
use sdf_core::config::DoraConfig;
use sdf_core::errors::StorageError;

use super::classification::classify_performance;
use super::correlation::correlate;
use super::impact::parity_impact;
use super::types::{
    CorrelationAnalysis, DeploymentRecord, DoraMetrics, IncidentRecord, ParityImpact,
};
use crate::connection::DatabaseManager;
use crate::queries::deployments::{self, DeploymentRow};
use crate::queries::incidents::{self, IncidentRow};

const SECONDS_PER_DAY: i64 = 86_400;

pub struct DoraStore {
    db: DatabaseManager,
    config: DoraConfig,
}

impl DoraStore {
    /// Open (creating tables and indexes if missing) the store at `path`.
    pub fn open(path: &Path, config: &DoraConfig) -> Result<Self, StorageError> {
        Ok(Self::from_manager(DatabaseManager::open(path)?, config))
    }

    pub fn open_in_memory(config: &DoraConfig) -> Result<Self, StorageError> {
        Ok(Self::from_manager(DatabaseManager::open_in_memory()?, config))
    }

    pub fn from_manager(db: DatabaseManager, config: &DoraConfig) -> Self {
        Self {
            db,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &DoraConfig {
        &self.config
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }

    /// Record a deployment made now. Returns its id.
    pub fn record_deployment(
        &self,
        version: &str,
        commit_sha: &str,
        parity_score: Option<f64>,
        success: bool,
        lead_time_minutes: i64,
    ) -> Result<i64, StorageError> {
        self.record_deployment_at(
            Utc::now(),
            version,
            commit_sha,
            parity_score,
            success,
            lead_time_minutes,
        )
    }

    /// Record a deployment made at `at`. Returns its id.
    pub fn record_deployment_at(
        &self,
        at: DateTime<Utc>,
        version: &str,
        commit_sha: &str,
        parity_score: Option<f64>,
        success: bool,
        lead_time_minutes: i64,
    ) -> Result<i64, StorageError> {
        let id = self.db.write_transaction(|tx| {
            deployments::insert(
                tx,
                at.timestamp(),
                version,
                commit_sha,
                parity_score,
                success,
                lead_time_minutes,
            )
        })?;
        ::tracing::info!(id, version, commit_sha, ?parity_score, success, "recorded deployment");
        Ok(id)
    }

    /// Record an incident against `deployment_id`, resolved at `resolved_at`.
    ///
    /// MTTR is whole minutes from the deployment to resolution. Fails with
    /// `NotFound` and writes nothing when the deployment does not exist.
    pub fn record_incident(
        &self,
        deployment_id: i64,
        resolved_at: DateTime<Utc>,
        caused_by_deployment: bool,
    ) -> Result<i64, StorageError> {
        let id = self.db.write_transaction(|tx| {
            let deployment =
                deployments::get_by_id(tx, deployment_id)?.ok_or(StorageError::NotFound {
                    entity: "deployment",
                    id: deployment_id,
                })?;

            let elapsed = resolved_at.timestamp() - deployment.timestamp;
            if elapsed < 0 {
                ::tracing::warn!(
                    deployment_id,
                    "incident resolved before its deployment; recording zero MTTR"
                );
            }
            let mttr_minutes = elapsed.max(0) / 60;

            incidents::insert(
                tx,
                deployment.timestamp,
                deployment_id,
                resolved_at.timestamp(),
                mttr_minutes,
                caused_by_deployment,
            )
        })?;
        ::tracing::info!(id, deployment_id, caused_by_deployment, "recorded incident");
        Ok(id)
    }

    pub fn get_deployment(&self, id: i64) -> Result<DeploymentRecord, StorageError> {
        let row = self
            .db
            .read_transaction(|tx| deployments::get_by_id(tx, id))?
            .ok_or(StorageError::NotFound {
                entity: "deployment",
                id,
            })?;
        deployment_record(row)
    }

    pub fn list_incidents_for(
        &self,
        deployment_id: i64,
    ) -> Result<Vec<IncidentRecord>, StorageError> {
        self.db
            .read_transaction(|tx| incidents::list_for_deployment(tx, deployment_id))?
            .into_iter()
            .map(incident_record)
            .collect()
    }

    /// Deployments in the `days` window ending now, oldest first.
    pub fn list_deployments(&self, days: u32) -> Result<Vec<DeploymentRecord>, StorageError> {
        let since = window_start(Utc::now(), days);
        self.db
            .read_transaction(|tx| deployments::list_since(tx, since))?
            .into_iter()
            .map(deployment_record)
            .collect()
    }

    /// Four Key Metrics over the `days` window ending now.
    pub fn calculate_dora_metrics(&self, days: u32) -> Result<DoraMetrics, StorageError> {
        self.calculate_dora_metrics_at(Utc::now(), days)
    }

    /// Four Key Metrics over the `days` window ending at `now`.
    ///
    /// Empty windows, and `days == 0`, give zero metrics classified LOW.
    pub fn calculate_dora_metrics_at(
        &self,
        now: DateTime<Utc>,
        days: u32,
    ) -> Result<DoraMetrics, StorageError> {
        if days == 0 {
            return Ok(DoraMetrics::neutral(0));
        }
        let since = window_start(now, days);

        let (counts, failed, mttr) = self.db.read_transaction(|tx| {
            Ok((
                deployments::window_counts(tx, since)?,
                incidents::count_failed_deployments_since(tx, since)?,
                incidents::mean_mttr_since(tx, since)?,
            ))
        })?;

        let deployment_frequency = counts.successful as f64 / f64::from(days);
        let lead_time_minutes = counts.mean_lead_time.unwrap_or(0.0);
        let change_failure_rate = if counts.total > 0 {
            failed as f64 / counts.total as f64
        } else {
            0.0
        };
        let mttr_minutes = mttr.unwrap_or(0.0);

        let classification = classify_performance(
            deployment_frequency,
            lead_time_minutes,
            change_failure_rate,
            mttr_minutes,
            &self.config.classification,
        );

        ::tracing::debug!(
            days,
            total = counts.total,
            failed,
            %classification,
            "calculated DORA metrics"
        );

        Ok(DoraMetrics {
            deployment_frequency,
            lead_time_minutes,
            change_failure_rate,
            mttr_minutes,
            classification,
            period_days: days,
        })
    }

    /// Parity/outcome correlation over the `days` window ending now.
    pub fn analyze_correlation(&self, days: u32) -> Result<CorrelationAnalysis, StorageError> {
        self.analyze_correlation_at(Utc::now(), days)
    }

    pub fn analyze_correlation_at(
        &self,
        now: DateTime<Utc>,
        days: u32,
    ) -> Result<CorrelationAnalysis, StorageError> {
        let since = window_start(now, days);
        let samples = self
            .db
            .read_transaction(|tx| deployments::parity_outcomes_since(tx, since))?;

        let analysis = correlate(
            &samples,
            self.config.effective_high_parity_cutoff(),
            self.config.effective_min_correlation_samples(),
        );
        if analysis.insufficient_data {
            ::tracing::debug!(samples = samples.len(), "not enough deployments to correlate");
        }
        Ok(analysis)
    }

    /// Success rate at or above `min_parity` vs below it, over all history.
    pub fn get_parity_impact(&self, min_parity: f64) -> Result<ParityImpact, StorageError> {
        let (high, low) = self.db.read_transaction(|tx| {
            Ok((
                deployments::outcome_at_or_above(tx, min_parity)?,
                deployments::outcome_below(tx, min_parity)?,
            ))
        })?;
        Ok(parity_impact(min_parity, high, low))
    }

    pub fn deployment_count(&self) -> Result<i64, StorageError> {
        self.db.read_transaction(|tx| deployments::count(tx))
    }

    pub fn incident_count(&self) -> Result<i64, StorageError> {
        self.db.read_transaction(|tx| incidents::count(tx))
    }
}

/// Exclusive lower bound, in epoch seconds, of a `days` window ending at `now`.
fn window_start(now: DateTime<Utc>, days: u32) -> i64 {
    now.timestamp() - i64::from(days) * SECONDS_PER_DAY
}

fn to_datetime(secs: i64) -> Result<DateTime<Utc>, StorageError> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| StorageError::SqliteError {
        message: format!("timestamp {secs} out of range"),
    })
}

fn deployment_record(row: DeploymentRow) -> Result<DeploymentRecord, StorageError> {
    Ok(DeploymentRecord {
        id: row.id,
        timestamp: to_datetime(row.timestamp)?,
        version: row.version,
        commit_sha: row.commit_sha,
        parity_score: row.parity_score,
        success: row.success,
        lead_time_minutes: row.lead_time_minutes,
    })
}

fn incident_record(row: IncidentRow) -> Result<IncidentRecord, StorageError> {
    Ok(IncidentRecord {
        id: row.id,
        timestamp: to_datetime(row.timestamp)?,
        deployment_id: row.deployment_id,
        resolved_at: to_datetime(row.resolved_at)?,
        mttr_minutes: row.mttr_minutes,
        caused_by_deployment: row.caused_by_deployment,
    })
}
