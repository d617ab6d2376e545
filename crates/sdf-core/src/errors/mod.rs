//! Error handling for SDF-CVF.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod hook_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::SdfErrorCode;
pub use graph_error::GraphError;
pub use hook_error::HookError;
pub use storage_error::StorageError;
