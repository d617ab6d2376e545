//! Pre-commit hook installation.

use std::path::{Path, PathBuf};

use git2::Repository;

use sdf_core::errors::HookError;

/// Script written to `.git/hooks/pre-commit`. Bypass with `git commit --no-verify`.
pub const PRE_COMMIT_HOOK: &str = "#!/bin/sh
# SDF-CVF pre-commit hook: checks quartet parity of the staged change set.
# Installed by `sdf-cvf install-hooks`; remove with `sdf-cvf install-hooks uninstall`.
exec sdf-cvf check --gate pre-commit --hook
";

const HOOK_NAME: &str = "pre-commit";
const BACKUP_NAME: &str = "pre-commit.backup";

/// What `install_pre_commit_hook` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInstall {
    pub hook_path: PathBuf,
    /// Where a pre-existing hook was copied, if there was one.
    pub backup_path: Option<PathBuf>,
}

/// What `uninstall_pre_commit_hook` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookUninstall {
    /// The backed-up hook was put back.
    RestoredBackup(PathBuf),
    /// The hook was deleted; there was no backup.
    Removed(PathBuf),
    /// There was no hook to remove.
    NotInstalled,
}

/// Install the pre-commit hook, backing up any existing one first.
pub fn install_pre_commit_hook(repo_root: &Path) -> Result<HookInstall, HookError> {
    let hooks_dir = hooks_dir(repo_root)?;
    std::fs::create_dir_all(&hooks_dir).map_err(|e| io_err(&hooks_dir, e))?;

    let hook_path = hooks_dir.join(HOOK_NAME);
    // Reinstalling over our own hook keeps the earlier backup intact.
    let already_ours = std::fs::read_to_string(&hook_path).is_ok_and(|c| c == PRE_COMMIT_HOOK);
    let backup_path = if hook_path.exists() && !already_ours {
        let backup = hooks_dir.join(BACKUP_NAME);
        std::fs::copy(&hook_path, &backup).map_err(|e| io_err(&backup, e))?;
        tracing::info!(backup = %backup.display(), "existing pre-commit hook backed up");
        Some(backup)
    } else {
        None
    };

    std::fs::write(&hook_path, PRE_COMMIT_HOOK).map_err(|e| io_err(&hook_path, e))?;
    make_executable(&hook_path)?;
    tracing::info!(hook = %hook_path.display(), "pre-commit hook installed");

    Ok(HookInstall {
        hook_path,
        backup_path,
    })
}

/// Restore the backed-up hook if present, else remove the installed hook.
/// Outside a git repository there is nothing installed.
pub fn uninstall_pre_commit_hook(repo_root: &Path) -> Result<HookUninstall, HookError> {
    let hooks_dir = match hooks_dir(repo_root) {
        Ok(dir) => dir,
        Err(HookError::NotARepository { path }) => {
            tracing::debug!(path, "not a git repository; no hook to remove");
            return Ok(HookUninstall::NotInstalled);
        }
        Err(e) => return Err(e),
    };
    let hook_path = hooks_dir.join(HOOK_NAME);
    let backup_path = hooks_dir.join(BACKUP_NAME);

    if !hook_path.exists() {
        return Ok(HookUninstall::NotInstalled);
    }

    if backup_path.exists() {
        std::fs::copy(&backup_path, &hook_path).map_err(|e| io_err(&hook_path, e))?;
        std::fs::remove_file(&backup_path).map_err(|e| io_err(&backup_path, e))?;
        Ok(HookUninstall::RestoredBackup(hook_path))
    } else {
        std::fs::remove_file(&hook_path).map_err(|e| io_err(&hook_path, e))?;
        Ok(HookUninstall::Removed(hook_path))
    }
}

/// `<git dir>/hooks` for the repository at `repo_root`.
fn hooks_dir(repo_root: &Path) -> Result<PathBuf, HookError> {
    let repo = Repository::open(repo_root).map_err(|_| HookError::NotARepository {
        path: repo_root.display().to_string(),
    })?;
    Ok(repo.path().join("hooks"))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), HookError> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path).map_err(|e| io_err(path, e))?.permissions();
    perms.set_mode(perms.mode() | 0o111);
    std::fs::set_permissions(path, perms).map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), HookError> {
    Ok(())
}

fn io_err(path: &Path, e: std::io::Error) -> HookError {
    HookError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
