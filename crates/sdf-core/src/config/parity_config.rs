//! Parity calculator configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Warning thresholds and weights for the parity calculator.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ParityConfig {
    /// Code↔docs similarity below this emits a warning. Default: 0.85.
    pub code_docs_warn: Option<f64>,
    /// Code↔tests similarity below this emits a warning. Default: 0.85.
    pub code_tests_warn: Option<f64>,
    /// Code↔traces similarity below this emits a warning. Default: 0.70.
    pub code_traces_warn: Option<f64>,
    /// Weighted-parity weight for code↔docs. Default: 0.40.
    pub docs_weight: Option<f64>,
    /// Weighted-parity weight for code↔tests. Default: 0.40.
    pub tests_weight: Option<f64>,
    /// Weighted-parity weight for code↔traces. Default: 0.20.
    pub traces_weight: Option<f64>,
    /// Characters of bucket text the fallback embedder looks at. Default: 1000.
    pub max_embed_chars: Option<usize>,
}

impl ParityConfig {
    pub fn effective_code_docs_warn(&self) -> f64 {
        self.code_docs_warn.unwrap_or(constants::DEFAULT_CODE_DOCS_WARN)
    }

    pub fn effective_code_tests_warn(&self) -> f64 {
        self.code_tests_warn.unwrap_or(constants::DEFAULT_CODE_TESTS_WARN)
    }

    pub fn effective_code_traces_warn(&self) -> f64 {
        self.code_traces_warn.unwrap_or(constants::DEFAULT_CODE_TRACES_WARN)
    }

    /// Returns `(docs, tests, traces)` weights.
    pub fn effective_weights(&self) -> (f64, f64, f64) {
        (
            self.docs_weight.unwrap_or(constants::DEFAULT_DOCS_WEIGHT),
            self.tests_weight.unwrap_or(constants::DEFAULT_TESTS_WEIGHT),
            self.traces_weight.unwrap_or(constants::DEFAULT_TRACES_WEIGHT),
        )
    }

    pub fn effective_max_embed_chars(&self) -> usize {
        self.max_embed_chars.unwrap_or(constants::DEFAULT_MAX_EMBED_CHARS)
    }
}
