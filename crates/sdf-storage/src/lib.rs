//! # sdf-storage
//!
//! SQLite persistence for deployment and incident history.
//! One connection per database file, versioned migrations,
//! and the DORA metrics store + parity correlator built on top.

pub mod connection;
pub mod dora;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use dora::{
    report_dora_metrics, CorrelationAnalysis, DeploymentRecord, DoraMetrics, DoraReport,
    DoraStore, IncidentRecord, ParityImpact, PerformanceClass,
};
