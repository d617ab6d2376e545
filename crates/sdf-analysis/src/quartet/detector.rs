//! Quartet detector.

use super::classifier::classify;
use super::types::{FileClassification, Quartet};

/// Partitions a change set into a [`Quartet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QuartetDetector;

impl QuartetDetector {
    pub fn new() -> Self {
        Self
    }

    /// Classify one path.
    pub fn classify(&self, path: &str) -> FileClassification {
        classify(path)
    }

    /// Classify every path and bucket it. Unknown paths are dropped;
    /// each bucket preserves input order.
    pub fn detect_from_changes<S: AsRef<str>>(&self, paths: &[S]) -> Quartet {
        let mut quartet = Quartet::default();
        for path in paths {
            let path = path.as_ref();
            let bucket = match classify(path) {
                FileClassification::Code => &mut quartet.code,
                FileClassification::Docs => &mut quartet.docs,
                FileClassification::Tests => &mut quartet.tests,
                FileClassification::Traces => &mut quartet.traces,
                FileClassification::Unknown => {
                    tracing::trace!(path, "unclassified path dropped");
                    continue;
                }
            };
            bucket.push(path.to_string());
        }
        tracing::debug!(
            code = quartet.code.len(),
            docs = quartet.docs.len(),
            tests = quartet.tests.len(),
            traces = quartet.traces.len(),
            "quartet detected"
        );
        quartet
    }

    /// One warning per empty bucket.
    pub fn validate(&self, quartet: &Quartet) -> Vec<String> {
        let mut warnings = Vec::new();
        if !quartet.has_code() {
            warnings.push("No code files in quartet".to_string());
        }
        if !quartet.has_docs() {
            warnings.push("No documentation for code changes".to_string());
        }
        if !quartet.has_tests() {
            warnings.push("No tests for code changes".to_string());
        }
        if !quartet.has_traces() {
            warnings.push("No audit/trace files for changes".to_string());
        }
        warnings
    }
}

/// Component name following a `packages/` segment, e.g. `vif` for
/// `packages/vif/witness.py`.
pub fn extract_module_name(path: &str) -> Option<&str> {
    let mut parts = path.split(['/', '\\']).filter(|p| !p.is_empty());
    parts.find(|p| *p == "packages")?;
    parts.next()
}
