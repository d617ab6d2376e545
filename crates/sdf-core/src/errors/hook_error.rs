//! Git hook and version-control errors.

use super::error_code::{self, SdfErrorCode};

/// Errors raised while installing hooks or reading the staged change set.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Not a git repository: {path}")]
    NotARepository { path: String },

    #[error("Hook I/O failed for {path}: {message}")]
    Io { path: String, message: String },

    #[error("Git error: {message}")]
    Git { message: String },
}

impl SdfErrorCode for HookError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotARepository { .. } => error_code::NOT_A_REPOSITORY,
            Self::Io { .. } | Self::Git { .. } => error_code::HOOK_ERROR,
        }
    }
}
