//! Queries for the incidents table.

use rusqlite::{params, Connection};
use sdf_core::errors::StorageError;

/// An incidents row as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRow {
    pub id: i64,
    pub timestamp: i64,
    pub deployment_id: i64,
    pub resolved_at: i64,
    pub mttr_minutes: i64,
    pub caused_by_deployment: bool,
}

/// Insert an incident. Returns the new row id.
pub fn insert(
    conn: &Connection,
    timestamp: i64,
    deployment_id: i64,
    resolved_at: i64,
    mttr_minutes: i64,
    caused_by_deployment: bool,
) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "INSERT INTO incidents
            (timestamp, deployment_id, resolved_at, mttr_minutes, caused_by_deployment)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            timestamp,
            deployment_id,
            resolved_at,
            mttr_minutes,
            caused_by_deployment
        ])
    })
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;
    Ok(conn.last_insert_rowid())
}

/// Incidents attributed to one deployment, oldest first.
pub fn list_for_deployment(
    conn: &Connection,
    deployment_id: i64,
) -> Result<Vec<IncidentRow>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, timestamp, deployment_id, resolved_at, mttr_minutes, caused_by_deployment
             FROM incidents WHERE deployment_id = ?1 ORDER BY id",
        )
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    let rows = stmt
        .query_map(params![deployment_id], |row| {
            Ok(IncidentRow {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                deployment_id: row.get(2)?,
                resolved_at: row.get(3)?,
                mttr_minutes: row.get(4)?,
                caused_by_deployment: row.get(5)?,
            })
        })
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Distinct deployments after `since` with at least one incident they caused.
pub fn count_failed_deployments_since(conn: &Connection, since: i64) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(DISTINCT i.deployment_id)
         FROM incidents i JOIN deployments d ON d.id = i.deployment_id
         WHERE d.timestamp > ?1 AND i.caused_by_deployment = 1",
        params![since],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Mean MTTR of incidents after `since`; `None` when there are none.
pub fn mean_mttr_since(conn: &Connection, since: i64) -> Result<Option<f64>, StorageError> {
    conn.query_row(
        "SELECT AVG(mttr_minutes) FROM incidents WHERE timestamp > ?1",
        params![since],
        |row| row.get(0),
    )
    .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}

/// Total number of incidents.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM incidents", [], |row| row.get(0))
        .map_err(|e| StorageError::SqliteError { message: e.to_string() })
}
