pub mod blast_radius;
pub mod check;
pub mod classify;
pub mod dora;
pub mod hooks;
pub mod parity;

use std::path::Path;

use anyhow::Context;
use sdf_analysis::vcs::staged_files;
use sdf_core::config::CliOverrides;
use sdf_core::SdfConfig;

/// Layered config for `root`, with this invocation's flag overrides on top.
pub fn load_config(root: &Path, overrides: &CliOverrides) -> anyhow::Result<SdfConfig> {
    SdfConfig::load(root, Some(overrides))
        .with_context(|| format!("loading configuration for {}", root.display()))
}

/// The explicit file list, or the staged change set when none was given.
pub fn files_or_staged(root: &Path, files: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !files.is_empty() {
        return Ok(files);
    }
    staged_files(root).context("reading staged files")
}
