//! Staged files from the git index.

use std::path::Path;

use git2::{DiffOptions, Repository};

use sdf_core::errors::HookError;

/// Paths staged for commit, relative to the work tree, in diff order.
///
/// Compares the index against `HEAD`; before the first commit every
/// indexed file counts as staged. Deleted files are included.
pub fn staged_files(repo_root: &Path) -> Result<Vec<String>, HookError> {
    let repo = Repository::discover(repo_root).map_err(|_| HookError::NotARepository {
        path: repo_root.display().to_string(),
    })?;

    let head_tree = repo.head().ok().and_then(|head| head.peel_to_tree().ok());
    let index = repo.index().map_err(git_err)?;
    let mut opts = DiffOptions::new();
    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), Some(&index), Some(&mut opts))
        .map_err(git_err)?;

    let files: Vec<String> = diff
        .deltas()
        .filter_map(|delta| {
            delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect();

    tracing::debug!(count = files.len(), "staged files read from index");
    Ok(files)
}

fn git_err(e: git2::Error) -> HookError {
    HookError::Git {
        message: e.message().to_string(),
    }
}
