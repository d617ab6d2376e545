//! Import graph errors.

use super::error_code::{self, SdfErrorCode};

/// Errors raised while preparing the import graph.
///
/// Per-file failures never surface here; they are logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Blast radius analysis unavailable: {message}. {remedy}")]
    Setup { message: String, remedy: String },

    #[error("Repository root not found: {path}")]
    RootNotFound { path: String },
}

impl SdfErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Setup { .. } => error_code::GRAPH_SETUP_ERROR,
            Self::RootNotFound { .. } => error_code::GRAPH_ERROR,
        }
    }
}
