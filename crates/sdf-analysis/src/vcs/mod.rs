//! Git integration: staged change set and pre-commit hook installation.

pub mod hooks;
pub mod staged;

pub use hooks::{install_pre_commit_hook, uninstall_pre_commit_hook, HookInstall, HookUninstall, PRE_COMMIT_HOOK};
pub use staged::staged_files;
