//! Path → dotted module key conversion.

use std::path::{Component, Path};

/// Module key for `path` relative to `root`.
///
/// `pkg/sub/mod.py` becomes `pkg.sub.mod` and `pkg/__init__.py` becomes
/// `pkg`. Paths outside `root` keep their raw text as the key.
pub fn path_to_module_key(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => relative_key(rel),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

/// Module key for a changed-file path as a caller supplies it.
///
/// Relative paths are taken as relative to `root`.
pub fn module_key_for(root: &Path, changed: &str) -> String {
    let path = Path::new(changed);
    if path.is_absolute() {
        path_to_module_key(root, path)
    } else {
        relative_key(path)
    }
}

fn relative_key(rel: &Path) -> String {
    let mut parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .flat_map(|s| {
            s.split('\\')
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    if let Some(last) = parts.last_mut() {
        if let Some(stem) = last.strip_suffix(".py") {
            *last = stem.to_string();
        }
    }
    if parts.len() > 1 && parts.last().is_some_and(|p| p == "__init__") {
        parts.pop();
    }
    parts.join(".")
}
