//! V001: deployments and incidents.
//! Timestamps are UTC epoch seconds; booleans are 0/1 integers.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS deployments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp INTEGER NOT NULL,
    version TEXT NOT NULL,
    commit_sha TEXT NOT NULL,
    parity_score REAL,
    success INTEGER NOT NULL CHECK (success IN (0, 1)),
    lead_time_minutes INTEGER NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_deployments_timestamp
    ON deployments(timestamp);

-- An incident carries the timestamp of the deployment it is attributed to,
-- so windowed queries bucket it with that deployment.
CREATE TABLE IF NOT EXISTS incidents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp INTEGER NOT NULL,
    deployment_id INTEGER NOT NULL REFERENCES deployments(id),
    resolved_at INTEGER NOT NULL,
    mttr_minutes INTEGER NOT NULL,
    caused_by_deployment INTEGER NOT NULL CHECK (caused_by_deployment IN (0, 1))
) STRICT;

CREATE INDEX IF NOT EXISTS idx_incidents_timestamp
    ON incidents(timestamp);
CREATE INDEX IF NOT EXISTS idx_incidents_deployment
    ON incidents(deployment_id);
"#;
