//! Repository walk → import graph.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use sdf_core::config::BlastRadiusConfig;
use sdf_core::errors::GraphError;

use super::imports::{ImportExtractor, ImportRef};
use super::module_key::path_to_module_key;
use super::types::ImportGraph;
use crate::quartet::classifier::is_test_path;

/// Walks a repository and builds its [`ImportGraph`] from Python sources.
pub struct ImportGraphBuilder {
    root: PathBuf,
    excluded_dirs: Vec<String>,
    respect_gitignore: bool,
    extractor: ImportExtractor,
}

impl ImportGraphBuilder {
    /// Fails with a setup error if the Python grammar is unavailable.
    pub fn new(root: impl Into<PathBuf>, config: &BlastRadiusConfig) -> Result<Self, GraphError> {
        Ok(Self {
            root: root.into(),
            excluded_dirs: config.effective_excluded_dirs(),
            respect_gitignore: config.effective_respect_gitignore(),
            extractor: ImportExtractor::new()?,
        })
    }

    /// Walk the root and build the graph.
    ///
    /// Unreadable files and files that fail to parse are skipped.
    pub fn build(mut self) -> Result<ImportGraph, GraphError> {
        if !self.root.is_dir() {
            return Err(GraphError::RootNotFound {
                path: self.root.display().to_string(),
            });
        }

        let mut graph = ImportGraph::new();
        let mut pending: Vec<(String, ImportRef)> = Vec::new();
        let mut skipped = 0usize;

        for path in self.source_files() {
            let source = match std::fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "unreadable source skipped");
                    skipped += 1;
                    continue;
                }
            };

            let key = path_to_module_key(&self.root, &path);
            let is_package = path.file_name().is_some_and(|n| n == "__init__.py");
            let Some(imports) = self.extractor.extract(&source, &key, is_package) else {
                tracing::debug!(path = %path.display(), "parse error, file skipped");
                skipped += 1;
                continue;
            };

            graph.set_path(&key, self.display_path(&path));
            for import in imports {
                graph.add_import(&key, &import.module, import.line);
                pending.push((key.clone(), import));
            }
        }

        // `from pkg import mod` also depends on `pkg.mod` when that is a file.
        for (from, import) in pending {
            for name in &import.names {
                let candidate = format!("{}.{}", import.module, name);
                if graph.has_path(&candidate) {
                    graph.add_import(&from, &candidate, import.line);
                }
            }
        }

        let stats = graph.stats();
        tracing::info!(
            root = %self.root.display(),
            modules = stats.modules,
            edges = stats.edges,
            files = stats.files,
            skipped,
            "import graph built"
        );
        Ok(graph)
    }

    /// Path as reported in results: relative to the root, `/`-separated.
    fn display_path(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.to_string_lossy().replace('\\', "/")
    }

    /// Python files under the root, minus excluded directories and test files.
    fn source_files(&self) -> Vec<PathBuf> {
        let excluded = self.excluded_dirs.clone();
        let walker = WalkBuilder::new(&self.root)
            .git_ignore(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && excluded.iter().any(|d| entry.file_name() == d.as_str()))
            })
            .build();

        let mut files: Vec<PathBuf> = walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| is_python_source(path))
            .collect();
        files.sort();
        files
    }
}

fn is_python_source(path: &Path) -> bool {
    if !path.extension().is_some_and(|e| e == "py") {
        return false;
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    !is_test_path(&name)
}
