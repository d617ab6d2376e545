//! Quartet detection: classify changed paths into code, docs, tests and traces.

pub mod classifier;
pub mod detector;
pub mod types;

pub use classifier::classify;
pub use detector::{extract_module_name, QuartetDetector};
pub use types::{FileClassification, Quartet};
