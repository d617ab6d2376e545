//! PRAGMA configuration applied to the database connection.
//!
//! Rollback journal (DELETE), FULL sync, 5s busy_timeout, foreign_keys ON.
//! Committed data lives only in the database file.

use rusqlite::Connection;
use sdf_core::errors::StorageError;

pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = DELETE;
        PRAGMA synchronous = FULL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| StorageError::SqliteError {
        message: e.to_string(),
    })
}

/// Current journal mode, lowercased. In-memory databases report `memory`.
pub fn journal_mode(conn: &Connection) -> Result<String, StorageError> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(mode.to_ascii_lowercase())
}
