//! DORA Four Key Metrics over the deployment history, and the
//! parity/outcome correlation.

pub mod classification;
pub mod correlation;
pub mod impact;
pub mod report;
pub mod store;
pub mod types;

pub use classification::classify_performance;
pub use report::{render_report, report_dora_metrics, DoraReport};
pub use store::DoraStore;
pub use types::{
    CorrelationAnalysis, DeploymentRecord, DoraMetrics, IncidentRecord, ParityImpact,
    PerformanceClass,
};
