//! Versioned schema migrations, tracked in `PRAGMA user_version`.

pub mod v001_dora;

use rusqlite::Connection;
use sdf_core::errors::StorageError;

/// Ordered list of (version, SQL). Append only.
const MIGRATIONS: &[(u32, &str)] = &[(1, v001_dora::MIGRATION_SQL)];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 1;

/// Apply every migration newer than the database's `user_version`.
/// Each migration runs in its own transaction. Safe to call repeatedly.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current = current_version(conn)?;
    for &(version, sql) in MIGRATIONS {
        if version <= current {
            continue;
        }
        let failed = |e: rusqlite::Error| StorageError::MigrationFailed {
            version,
            message: e.to_string(),
        };
        let tx = conn.unchecked_transaction().map_err(failed)?;
        tx.execute_batch(sql).map_err(failed)?;
        tx.pragma_update(None, "user_version", version)
            .map_err(failed)?;
        tx.commit().map_err(failed)?;
        ::tracing::info!(version, "applied metrics schema migration");
    }
    Ok(())
}

/// Schema version recorded in the database.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })
}
