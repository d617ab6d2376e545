//! Parity result.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Outcome of parity computation over one quartet.
#[derive(Debug, Clone, PartialEq)]
pub struct ParityResult {
    /// Mean of the three per-axis similarities, or 0.5 when incomplete.
    pub parity_score: f64,
    pub code_docs_similarity: f64,
    pub code_tests_similarity: f64,
    pub code_traces_similarity: f64,
    pub complete: bool,
    /// Names of the empty buckets; empty when complete.
    pub missing: Vec<String>,
    pub warnings: Vec<String>,
}

impl ParityResult {
    /// `parity_score >= threshold`.
    pub fn passes_gate(&self, threshold: f64) -> bool {
        self.parity_score >= threshold
    }
}

impl Serialize for ParityResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ParityResult", 9)?;
        s.serialize_field("parity_score", &self.parity_score)?;
        s.serialize_field("code_docs_similarity", &self.code_docs_similarity)?;
        s.serialize_field("code_tests_similarity", &self.code_tests_similarity)?;
        s.serialize_field("code_traces_similarity", &self.code_traces_similarity)?;
        s.serialize_field("complete", &self.complete)?;
        s.serialize_field("missing", &self.missing)?;
        s.serialize_field("warnings", &self.warnings)?;
        s.serialize_field("passes_gate_90", &self.passes_gate(0.90))?;
        s.serialize_field("passes_gate_95", &self.passes_gate(0.95))?;
        s.end()
    }
}
