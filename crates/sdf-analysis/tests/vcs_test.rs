//! Staged-file discovery and hook installation against real git repositories.

use std::path::Path;

use git2::{Repository, Signature};
use tempfile::TempDir;

use sdf_analysis::vcs::{
    install_pre_commit_hook, staged_files, uninstall_pre_commit_hook, HookUninstall, PRE_COMMIT_HOOK,
};
use sdf_core::errors::{HookError, SdfErrorCode};

fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}

fn stage(repo: &Repository, root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(rel)).unwrap();
    index.write().unwrap();
}

fn commit_all(repo: &Repository) {
    let mut index = repo.index().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("dev", "dev@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, "commit", &tree, &parents).unwrap();
}

#[test]
fn test_staged_files_before_first_commit() {
    let (dir, repo) = init_repo();
    stage(&repo, dir.path(), "src/a.py", "x = 1\n");
    stage(&repo, dir.path(), "docs/a.md", "# a\n");
    let mut files = staged_files(dir.path()).unwrap();
    files.sort();
    assert_eq!(files, vec!["docs/a.md", "src/a.py"]);
}

#[test]
fn test_staged_files_only_reports_changes_since_head() {
    let (dir, repo) = init_repo();
    stage(&repo, dir.path(), "src/a.py", "x = 1\n");
    commit_all(&repo);
    assert!(staged_files(dir.path()).unwrap().is_empty());

    stage(&repo, dir.path(), "src/a.py", "x = 2\n");
    stage(&repo, dir.path(), "tests/test_a.py", "def test(): pass\n");
    // Unstaged edits are not part of the change set.
    std::fs::write(dir.path().join("unstaged.py"), "y = 1\n").unwrap();

    let mut files = staged_files(dir.path()).unwrap();
    files.sort();
    assert_eq!(files, vec!["src/a.py", "tests/test_a.py"]);
}

#[test]
fn test_staged_files_outside_repo() {
    let dir = TempDir::new().unwrap();
    let err = staged_files(dir.path()).unwrap_err();
    assert!(matches!(err, HookError::NotARepository { .. }));
    assert_eq!(err.error_code(), "NOT_A_REPOSITORY");
}

#[test]
fn test_install_and_uninstall_without_existing_hook() {
    let (dir, repo) = init_repo();
    let installed = install_pre_commit_hook(dir.path()).unwrap();
    assert!(installed.backup_path.is_none());
    assert_eq!(installed.hook_path, repo.path().join("hooks/pre-commit"));
    assert_eq!(std::fs::read_to_string(&installed.hook_path).unwrap(), PRE_COMMIT_HOOK);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&installed.hook_path).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }

    match uninstall_pre_commit_hook(dir.path()).unwrap() {
        HookUninstall::Removed(path) => assert!(!path.exists()),
        other => panic!("expected Removed, got {other:?}"),
    }
    assert_eq!(uninstall_pre_commit_hook(dir.path()).unwrap(), HookUninstall::NotInstalled);
}

#[test]
fn test_existing_hook_is_backed_up_and_restored() {
    let (dir, repo) = init_repo();
    let hooks = repo.path().join("hooks");
    std::fs::create_dir_all(&hooks).unwrap();
    std::fs::write(hooks.join("pre-commit"), "#!/bin/sh\necho mine\n").unwrap();

    let installed = install_pre_commit_hook(dir.path()).unwrap();
    let backup = installed.backup_path.unwrap();
    assert_eq!(std::fs::read_to_string(&backup).unwrap(), "#!/bin/sh\necho mine\n");

    match uninstall_pre_commit_hook(dir.path()).unwrap() {
        HookUninstall::RestoredBackup(path) => {
            assert_eq!(std::fs::read_to_string(path).unwrap(), "#!/bin/sh\necho mine\n");
        }
        other => panic!("expected RestoredBackup, got {other:?}"),
    }
    assert!(!backup.exists());
}

#[test]
fn test_install_outside_repo_fails() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        install_pre_commit_hook(dir.path()),
        Err(HookError::NotARepository { .. })
    ));
}

#[test]
fn test_uninstall_outside_repo_reports_not_installed() {
    let dir = TempDir::new().unwrap();
    assert_eq!(uninstall_pre_commit_hook(dir.path()).unwrap(), HookUninstall::NotInstalled);
}

#[test]
fn test_reinstall_keeps_original_backup() {
    let (dir, repo) = init_repo();
    let hooks = repo.path().join("hooks");
    std::fs::create_dir_all(&hooks).unwrap();
    std::fs::write(hooks.join("pre-commit"), "#!/bin/sh\necho mine\n").unwrap();

    let first = install_pre_commit_hook(dir.path()).unwrap();
    assert!(first.backup_path.is_some());
    let second = install_pre_commit_hook(dir.path()).unwrap();
    assert!(second.backup_path.is_none());
    assert_eq!(
        std::fs::read_to_string(hooks.join("pre-commit.backup")).unwrap(),
        "#!/bin/sh\necho mine\n"
    );

    match uninstall_pre_commit_hook(dir.path()).unwrap() {
        HookUninstall::RestoredBackup(path) => {
            assert_eq!(std::fs::read_to_string(path).unwrap(), "#!/bin/sh\necho mine\n");
        }
        other => panic!("expected RestoredBackup, got {other:?}"),
    }
}
