use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use sdf_analysis::vcs::{install_pre_commit_hook, uninstall_pre_commit_hook, HookUninstall};
use sdf_core::config::CliOverrides;

use super::load_config;
use crate::output::print_json;

#[derive(Subcommand)]
pub enum HooksSubcommand {
    /// Restore the backed-up hook if there is one, else remove the hook
    Uninstall,
}

pub fn run(root: &Path, subcmd: Option<HooksSubcommand>, json: bool) -> anyhow::Result<()> {
    match subcmd {
        None => install(root, json),
        Some(HooksSubcommand::Uninstall) => uninstall(root, json),
    }
}

fn install(root: &Path, json: bool) -> anyhow::Result<()> {
    let installed = install_pre_commit_hook(root).context("installing pre-commit hook")?;
    let threshold = load_config(root, &CliOverrides::default())?
        .gates
        .effective_hook_threshold();

    if json {
        return print_json(&serde_json::json!({
            "hook_path": installed.hook_path,
            "backup_path": installed.backup_path,
            "threshold": threshold,
        }));
    }

    if let Some(backup) = &installed.backup_path {
        println!("Backed up existing pre-commit hook to {}", backup.display());
    }
    println!(
        "Installed SDF-CVF pre-commit hook at {}",
        installed.hook_path.display()
    );
    println!("   Parity threshold: {threshold:.2} (gates.hook_threshold in sdf.toml)");
    println!("   Bypass with: git commit --no-verify (not recommended)");
    Ok(())
}

fn uninstall(root: &Path, json: bool) -> anyhow::Result<()> {
    let outcome = uninstall_pre_commit_hook(root).context("removing pre-commit hook")?;

    let (status, message) = match &outcome {
        HookUninstall::RestoredBackup(path) => (
            "restored",
            format!("Restored previous pre-commit hook at {}", path.display()),
        ),
        HookUninstall::Removed(path) => (
            "removed",
            format!("Removed SDF-CVF pre-commit hook at {}", path.display()),
        ),
        HookUninstall::NotInstalled => ("not_installed", "No pre-commit hook installed".to_string()),
    };

    if json {
        print_json(&serde_json::json!({ "status": status, "message": message }))
    } else {
        println!("{message}");
        Ok(())
    }
}
