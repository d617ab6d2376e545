//! Parity calculator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sdf_core::config::ParityConfig;
use sdf_core::constants::INCOMPLETE_PARITY_SCORE;
use sdf_core::errors::ConfigError;

use super::embedder::Embedder;
use super::fallback::FallbackEmbedder;
use super::types::ParityResult;
use crate::quartet::Quartet;

/// Computes code-anchored similarity across the buckets of a quartet.
///
/// Holds the embedder explicitly; there is no global embedding function.
pub struct ParityCalculator {
    root: PathBuf,
    embedder: Arc<dyn Embedder>,
    config: ParityConfig,
}

impl ParityCalculator {
    /// Calculator over `root` using the fallback embedder and default thresholds.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(root, ParityConfig::default())
    }

    /// Calculator using the fallback embedder sized from `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: ParityConfig) -> Self {
        let embedder = Arc::new(FallbackEmbedder::new(config.effective_max_embed_chars()));
        Self {
            root: root.into(),
            embedder,
            config,
        }
    }

    /// Swap in another embedder. Non-deterministic embedders are rejected;
    /// wrap them in an unbounded [`super::CachingEmbedder`] first.
    pub fn with_embedder(mut self, embedder: Arc<dyn Embedder>) -> Result<Self, ConfigError> {
        if !embedder.is_deterministic() {
            return Err(ConfigError::InvalidValue {
                field: "embedder".to_string(),
                message: format!(
                    "embedder '{}' is not deterministic; wrap it in CachingEmbedder::new",
                    embedder.name()
                ),
            });
        }
        self.embedder = embedder;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    /// Compute parity for `quartet`.
    ///
    /// Unreadable files degrade silently. The only error is an embedder
    /// returning vectors of different non-zero lengths within one call.
    pub fn calculate(&self, quartet: &Quartet) -> Result<ParityResult, ConfigError> {
        if !quartet.is_complete() {
            let missing: Vec<String> = quartet.missing().into_iter().map(str::to_string).collect();
            let warnings = missing
                .iter()
                .map(|m| format!("Incomplete quartet: missing {m}"))
                .collect();
            tracing::debug!(?missing, "incomplete quartet");
            return Ok(ParityResult {
                parity_score: INCOMPLETE_PARITY_SCORE,
                code_docs_similarity: 0.0,
                code_tests_similarity: 0.0,
                code_traces_similarity: 0.0,
                complete: false,
                missing,
                warnings,
            });
        }

        let code = self.embed_bucket(&quartet.code);
        let docs = self.embed_bucket(&quartet.docs);
        let tests = self.embed_bucket(&quartet.tests);
        let traces = self.embed_bucket(&quartet.traces);
        check_dimensions(&[&code, &docs, &tests, &traces])?;

        let code_docs = cosine_similarity(&code, &docs);
        let code_tests = cosine_similarity(&code, &tests);
        let code_traces = cosine_similarity(&code, &traces);
        let parity_score = ((code_docs + code_tests + code_traces) / 3.0).clamp(0.0, 1.0);

        let mut warnings = Vec::new();
        if code_docs < self.config.effective_code_docs_warn() {
            warnings.push(format!("Low code-docs alignment: {code_docs:.2}"));
        }
        if code_tests < self.config.effective_code_tests_warn() {
            warnings.push(format!("Low code-tests alignment: {code_tests:.2}"));
        }
        if code_traces < self.config.effective_code_traces_warn() {
            warnings.push(format!("Low code-traces alignment: {code_traces:.2}"));
        }

        tracing::debug!(
            parity_score,
            code_docs,
            code_tests,
            code_traces,
            embedder = self.embedder.name(),
            "parity calculated"
        );

        Ok(ParityResult {
            parity_score,
            code_docs_similarity: code_docs,
            code_tests_similarity: code_tests,
            code_traces_similarity: code_traces,
            complete: true,
            missing: Vec::new(),
            warnings,
        })
    }

    /// Weighted overall score using the configured weights.
    pub fn weighted_parity(&self, result: &ParityResult) -> Result<f64, ConfigError> {
        let (docs, tests, traces) = self.config.effective_weights();
        weighted_parity(result, docs, tests, traces)
    }

    /// Aggregate embedding for one bucket.
    fn embed_bucket(&self, files: &[String]) -> Vec<f64> {
        let text = self.read_bucket(files);
        if text.trim().is_empty() {
            return vec![0.0; self.embedder.dimensions()];
        }
        self.embedder.embed(&text)
    }

    /// Concatenated bucket text; each readable file followed by a newline.
    fn read_bucket(&self, files: &[String]) -> String {
        let mut text = String::new();
        for file in files {
            let path = Path::new(file);
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                self.root.join(path)
            };
            match std::fs::read(&path) {
                Ok(bytes) => {
                    text.extend(
                        String::from_utf8_lossy(&bytes)
                            .chars()
                            .filter(|c| *c != char::REPLACEMENT_CHARACTER),
                    );
                    text.push('\n');
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
                }
            }
        }
        text
    }
}

fn check_dimensions(vectors: &[&Vec<f64>]) -> Result<(), ConfigError> {
    let mut expected: Option<usize> = None;
    for v in vectors.iter().filter(|v| v.iter().any(|x| *x != 0.0)) {
        match expected {
            None => expected = Some(v.len()),
            Some(len) if len != v.len() => {
                return Err(ConfigError::InvalidValue {
                    field: "embedder".to_string(),
                    message: format!(
                        "inconsistent embedding dimensions within one call: {len} vs {}",
                        v.len()
                    ),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Cosine similarity remapped to `[0, 1]` via `(cos + 1) / 2`.
///
/// Compares the common prefix of the two vectors. Empty or zero-magnitude
/// vectors yield 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0.0;
    }
    let (a, b) = (&a[..len], &b[..len]);

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b = b.iter().map(|y| y * y).sum::<f64>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    let remapped = (dot / (mag_a * mag_b) + 1.0) / 2.0;
    if remapped.is_finite() {
        remapped.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Weighted overall score, clamped to `[0, 1]`. Weights must sum to more than 0.
pub fn weighted_parity(
    result: &ParityResult,
    docs_weight: f64,
    tests_weight: f64,
    traces_weight: f64,
) -> Result<f64, ConfigError> {
    let total = docs_weight + tests_weight + traces_weight;
    if total.is_nan() || total <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field: "parity weights".to_string(),
            message: format!("weights must sum to more than 0, got {total}"),
        });
    }
    let weighted = result.code_docs_similarity * docs_weight
        + result.code_tests_similarity * tests_weight
        + result.code_traces_similarity * traces_weight;
    Ok(weighted.clamp(0.0, 1.0))
}

/// Build a quartet from explicit buckets and score it with the fallback embedder.
pub fn calculate_parity(
    root: impl Into<PathBuf>,
    code: Vec<String>,
    docs: Vec<String>,
    tests: Vec<String>,
    traces: Vec<String>,
) -> Result<ParityResult, ConfigError> {
    ParityCalculator::new(root).calculate(&Quartet::new(code, docs, tests, traces))
}
