//! Schema migrations and connection pragmas.

use rusqlite::Connection;
use sdf_storage::connection::pragmas::journal_mode;
use sdf_storage::migrations::{current_version, run_migrations, LATEST_VERSION};
use sdf_storage::queries::{deployments, incidents};
use sdf_storage::DatabaseManager;
use tempfile::TempDir;

fn setup_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
}

#[test]
fn migrations_are_idempotent() {
    let conn = setup_db();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    run_migrations(&conn).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn timestamp_indexes_exist() {
    let conn = setup_db();
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'")
        .unwrap();
    let names: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(names.contains(&"idx_deployments_timestamp".to_string()));
    assert!(names.contains(&"idx_incidents_timestamp".to_string()));
}

#[test]
fn deployment_query_roundtrip() {
    let conn = setup_db();
    let id = deployments::insert(&conn, 1_700_000_000, "v1", "abc", Some(0.8), true, 42).unwrap();
    let row = deployments::get_by_id(&conn, id).unwrap().unwrap();
    assert_eq!(row.timestamp, 1_700_000_000);
    assert_eq!(row.parity_score, Some(0.8));
    assert!(row.success);
    assert_eq!(row.lead_time_minutes, 42);
    assert!(deployments::get_by_id(&conn, id + 1).unwrap().is_none());
}

#[test]
fn window_counts_on_empty_table() {
    let conn = setup_db();
    let counts = deployments::window_counts(&conn, 0).unwrap();
    assert_eq!(counts.total, 0);
    assert_eq!(counts.successful, 0);
    assert!(counts.mean_lead_time.is_none());
    assert!(incidents::mean_mttr_since(&conn, 0).unwrap().is_none());
}

#[test]
fn incident_foreign_key_is_enforced_on_managed_connections() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let result = db.with_conn(|conn| incidents::insert(conn, 0, 12345, 60, 1, true));
    assert!(result.is_err());
}

#[test]
fn failed_write_transaction_rolls_back() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let result: Result<(), _> = db.write_transaction(|tx| {
        deployments::insert(tx, 1, "v1", "sha", None, true, 1)?;
        Err(sdf_core::errors::StorageError::NotFound {
            entity: "deployment",
            id: 7,
        })
    });
    assert!(result.is_err());
    assert_eq!(db.with_conn(|conn| deployments::count(conn)).unwrap(), 0);
}

#[test]
fn file_database_is_a_single_self_contained_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dora.db");
    let db = DatabaseManager::open(&path).unwrap();
    assert_eq!(db.with_conn(journal_mode).unwrap(), "delete");
    assert_eq!(db.path(), Some(path.as_path()));
    assert_eq!(db.with_conn(current_version).unwrap(), LATEST_VERSION);

    db.write_transaction(|tx| deployments::insert(tx, 1_700_000_000, "v1", "abc", Some(0.9), true, 5))
        .unwrap();

    // Still open: no journal or WAL side files linger after the commit.
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["dora.db".to_string()]);

    let copy_dir = TempDir::new().unwrap();
    let copy = copy_dir.path().join("copy.db");
    std::fs::copy(&path, &copy).unwrap();
    let conn = Connection::open(&copy).unwrap();
    assert_eq!(deployments::count(&conn).unwrap(), 1);
    let row = deployments::get_by_id(&conn, 1).unwrap().unwrap();
    assert_eq!(row.version, "v1");
}
