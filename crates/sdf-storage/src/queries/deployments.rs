//! Queries for the deployments table.

use rusqlite::{params, Connection, OptionalExtension, Row};
use sdf_core::errors::StorageError;

/// A deployments row as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRow {
    pub id: i64,
    pub timestamp: i64,
    pub version: String,
    pub commit_sha: String,
    pub parity_score: Option<f64>,
    pub success: bool,
    pub lead_time_minutes: i64,
}

/// Counts and lead time over the deployments after a cutoff.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowCounts {
    pub total: i64,
    pub successful: i64,
    /// Mean lead time of successful deployments; `None` when there are none.
    pub mean_lead_time: Option<f64>,
}

/// Success rate and sample size of one parity cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CohortOutcome {
    pub success_rate: Option<f64>,
    pub count: i64,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<DeploymentRow> {
    Ok(DeploymentRow {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        version: row.get(2)?,
        commit_sha: row.get(3)?,
        parity_score: row.get(4)?,
        success: row.get(5)?,
        lead_time_minutes: row.get(6)?,
    })
}

/// Insert a deployment. Returns the new row id.
pub fn insert(
    conn: &Connection,
    timestamp: i64,
    version: &str,
    commit_sha: &str,
    parity_score: Option<f64>,
    success: bool,
    lead_time_minutes: i64,
) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "INSERT INTO deployments
            (timestamp, version, commit_sha, parity_score, success, lead_time_minutes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            timestamp,
            version,
            commit_sha,
            parity_score,
            success,
            lead_time_minutes
        ])
    })
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Look up one deployment.
pub fn get_by_id(conn: &Connection, id: i64) -> Result<Option<DeploymentRow>, StorageError> {
    conn.query_row(
        "SELECT id, timestamp, version, commit_sha, parity_score, success, lead_time_minutes
         FROM deployments WHERE id = ?1",
        params![id],
        from_row,
    )
    .optional()
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Deployments strictly after `since`, oldest first.
pub fn list_since(conn: &Connection, since: i64) -> Result<Vec<DeploymentRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, timestamp, version, commit_sha, parity_score, success, lead_time_minutes
             FROM deployments WHERE timestamp > ?1 ORDER BY timestamp, id",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![since], from_row)
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Total, successful and mean successful lead time after `since`.
pub fn window_counts(conn: &Connection, since: i64) -> Result<WindowCounts, StorageError> {
    conn.query_row(
        "SELECT COUNT(*),
                COALESCE(SUM(success), 0),
                AVG(CASE WHEN success = 1 THEN lead_time_minutes END)
         FROM deployments WHERE timestamp > ?1",
        params![since],
        |row| {
            Ok(WindowCounts {
                total: row.get(0)?,
                successful: row.get(1)?,
                mean_lead_time: row.get(2)?,
            })
        },
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// (parity_score, success) for deployments after `since` that carry a score.
pub fn parity_outcomes_since(
    conn: &Connection,
    since: i64,
) -> Result<Vec<(f64, bool)>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT parity_score, success FROM deployments
             WHERE timestamp > ?1 AND parity_score IS NOT NULL
             ORDER BY timestamp, id",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![since], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Success rate over all deployments with `parity_score >= min_parity`.
pub fn outcome_at_or_above(
    conn: &Connection,
    min_parity: f64,
) -> Result<CohortOutcome, StorageError> {
    cohort_outcome(
        conn,
        "SELECT AVG(CAST(success AS REAL)), COUNT(*) FROM deployments
         WHERE parity_score >= ?1",
        min_parity,
    )
}

/// Success rate over all deployments with `parity_score < min_parity`.
pub fn outcome_below(conn: &Connection, min_parity: f64) -> Result<CohortOutcome, StorageError> {
    cohort_outcome(
        conn,
        "SELECT AVG(CAST(success AS REAL)), COUNT(*) FROM deployments
         WHERE parity_score < ?1 AND parity_score IS NOT NULL",
        min_parity,
    )
}

fn cohort_outcome(
    conn: &Connection,
    sql: &str,
    min_parity: f64,
) -> Result<CohortOutcome, StorageError> {
    conn.query_row(sql, params![min_parity], |row| {
        Ok(CohortOutcome {
            success_rate: row.get(0)?,
            count: row.get(1)?,
        })
    })
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Total number of deployments.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM deployments", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
