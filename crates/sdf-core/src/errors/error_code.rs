//! SdfErrorCode trait for machine-readable error reporting.

/// Every error enum implements this to expose a stable code string
/// that reports and CI logs can match on.
pub trait SdfErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const GRAPH_SETUP_ERROR: &str = "GRAPH_SETUP_ERROR";
pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const NOT_A_REPOSITORY: &str = "NOT_A_REPOSITORY";
pub const HOOK_ERROR: &str = "HOOK_ERROR";
