//! Python import extraction via tree-sitter.

use tree_sitter::{Node, Parser, Tree};

use sdf_core::errors::GraphError;

/// One import found in a file, already resolved to an absolute dotted key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRef {
    /// The imported module.
    pub module: String,
    /// Names pulled in by `from module import a, b`. Each may itself be a
    /// submodule; the builder links those once all files are known.
    pub names: Vec<String>,
    /// 1-based line of the statement.
    pub line: u32,
}

/// Parses Python source and lists its imports.
pub struct ImportExtractor {
    parser: Parser,
}

impl ImportExtractor {
    /// Fails with a setup error if the Python grammar cannot be loaded.
    pub fn new() -> Result<Self, GraphError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| GraphError::Setup {
                message: format!("Python grammar could not be loaded: {e}"),
                remedy: "Rebuild sdf-analysis against a tree-sitter version compatible with tree-sitter-python".to_string(),
            })?;
        Ok(Self { parser })
    }

    /// Imports in `source`, resolved against `module_key`.
    ///
    /// Returns `None` when the source does not parse cleanly; the caller
    /// treats such a file as contributing nothing.
    pub fn extract(&mut self, source: &str, module_key: &str, is_package: bool) -> Option<Vec<ImportRef>> {
        let tree: Tree = self.parser.parse(source, None)?;
        let root = tree.root_node();
        if root.has_error() {
            return None;
        }

        let package = package_parts(module_key, is_package);
        let mut imports = Vec::new();
        collect(root, source.as_bytes(), &package, &mut imports);
        Some(imports)
    }
}

/// Dotted parts of the package a module lives in.
fn package_parts(module_key: &str, is_package: bool) -> Vec<&str> {
    let mut parts: Vec<&str> = module_key.split('.').filter(|p| !p.is_empty()).collect();
    if !is_package {
        parts.pop();
    }
    parts
}

fn collect(node: Node, src: &[u8], package: &[&str], out: &mut Vec<ImportRef>) {
    match node.kind() {
        "import_statement" => {
            let line = node.start_position().row as u32 + 1;
            let mut cursor = node.walk();
            for name in node.children_by_field_name("name", &mut cursor) {
                if let Some(module) = imported_name(name, src) {
                    out.push(ImportRef {
                        module: module.to_string(),
                        names: Vec::new(),
                        line,
                    });
                }
            }
            return;
        }
        "import_from_statement" => {
            if let Some(import) = from_import(node, src, package) {
                out.push(import);
            }
            return;
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, src, package, out);
    }
}

/// `a.b` or `a.b as c` → `a.b`.
fn imported_name<'a>(node: Node, src: &'a [u8]) -> Option<&'a str> {
    let target = if node.kind() == "aliased_import" {
        node.child_by_field_name("name")?
    } else {
        node
    };
    target.utf8_text(src).ok()
}

fn from_import(node: Node, src: &[u8], package: &[&str]) -> Option<ImportRef> {
    let line = node.start_position().row as u32 + 1;
    let module_node = node.child_by_field_name("module_name")?;

    let module = if module_node.kind() == "relative_import" {
        resolve_relative(module_node, src, package)?
    } else {
        module_node.utf8_text(src).ok()?.to_string()
    };

    let mut names = Vec::new();
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        if let Some(n) = imported_name(name, src) {
            names.push(n.to_string());
        }
    }

    if module.is_empty() {
        // `from . import x` at the top of the tree: each name is a module.
        return names.first().map(|first| ImportRef {
            module: first.clone(),
            names: names[1..].to_vec(),
            line,
        });
    }
    Some(ImportRef { module, names, line })
}

/// `..sub.mod` inside package `a.b.c` → `a.b.sub.mod`.
fn resolve_relative(node: Node, src: &[u8], package: &[&str]) -> Option<String> {
    let mut level = 0usize;
    let mut tail: Option<&str> = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_prefix" => level = child.utf8_text(src).ok()?.matches('.').count(),
            "dotted_name" => tail = child.utf8_text(src).ok(),
            _ => {}
        }
    }

    let keep = package.len().checked_sub(level.saturating_sub(1))?;
    let mut parts: Vec<&str> = package[..keep].to_vec();
    if let Some(tail) = tail {
        parts.extend(tail.split('.'));
    }
    Some(parts.join("."))
}
