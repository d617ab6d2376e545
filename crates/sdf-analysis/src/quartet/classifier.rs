//! Ordered path classification.
//!
//! Rules are tried in order and the first match wins:
//! tests, traces, code, docs. Trace directories may hold `.md` files,
//! so traces must be checked before docs; `test_*.py` must be tests
//! even under `src/`, so extension dispatch comes after both.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;

use super::types::FileClassification;

const TEST_INDICATORS: &[&str] = &[
    "test_", "_test", ".test.", "tests/", "/test/", "spec/", ".spec.",
];

const TRACE_INDICATORS: &[&str] = &[
    // Directories.
    "audit/",
    "coordination/",
    "evidence/",
    "logs/",
    "trace/",
    "aether_memory/",
    // File patterns.
    ".log",
    "decision_log",
    "audit_",
    "witness_usage",
];

const DOC_INDICATORS: &[&str] = &[
    "docs/",
    "documentation/",
    "knowledge_architecture/systems/",
    "doc/",
    "readme",
];

const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "tsx", "jsx", "java", "cpp", "c", "h", "hpp", "go", "rs", "rb", "php",
    "swift", "kt", "scala", "clj", "ex", "exs",
];

const DOC_EXTENSIONS: &[&str] = &["md", "rst", "txt", "adoc", "docx"];

static TEST_MATCHER: LazyLock<Option<AhoCorasick>> =
    LazyLock::new(|| AhoCorasick::new(TEST_INDICATORS).ok());
static TRACE_MATCHER: LazyLock<Option<AhoCorasick>> =
    LazyLock::new(|| AhoCorasick::new(TRACE_INDICATORS).ok());
static DOC_MATCHER: LazyLock<Option<AhoCorasick>> =
    LazyLock::new(|| AhoCorasick::new(DOC_INDICATORS).ok());

/// Classify one path. Pure; never touches the file system.
pub fn classify(path: &str) -> FileClassification {
    let normalized = path.replace('\\', "/").to_lowercase();

    if is_test_path(&normalized) {
        return FileClassification::Tests;
    }
    if contains_any(&TRACE_MATCHER, TRACE_INDICATORS, &normalized) {
        return FileClassification::Traces;
    }

    let ext = extension(&normalized);
    if ext.is_some_and(|e| CODE_EXTENSIONS.contains(&e)) {
        return FileClassification::Code;
    }
    if contains_any(&DOC_MATCHER, DOC_INDICATORS, &normalized)
        || ext.is_some_and(|e| DOC_EXTENSIONS.contains(&e))
    {
        return FileClassification::Docs;
    }

    FileClassification::Unknown
}

/// True when a lowercased, `/`-separated path carries a test naming marker.
pub fn is_test_path(lowercased: &str) -> bool {
    contains_any(&TEST_MATCHER, TEST_INDICATORS, lowercased)
}

fn contains_any(matcher: &LazyLock<Option<AhoCorasick>>, patterns: &[&str], haystack: &str) -> bool {
    match matcher.as_ref() {
        Some(ac) => ac.is_match(haystack),
        None => patterns.iter().any(|p| haystack.contains(p)),
    }
}

/// Extension of the final path component, without the dot.
/// Dotfiles such as `.gitignore` have no extension.
fn extension(path: &str) -> Option<&str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&file_name[idx + 1..]),
    }
}
