//! Parity gate evaluation.

use sdf_core::errors::ConfigError;

use super::types::{GateConfig, GateResult};
use crate::parity::{ParityCalculator, ParityResult};
use crate::quartet::Quartet;

/// Stateless evaluator for one gate policy.
#[derive(Debug, Clone, Copy)]
pub struct ParityGate {
    config: GateConfig,
}

impl ParityGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate a parity result. Never fails; a policy violation is a
    /// negative result.
    pub fn evaluate(&self, parity: &ParityResult) -> GateResult {
        let mut reasons = Vec::new();

        if self.config.require_complete_quartet && !parity.complete {
            reasons.push(format!(
                "Incomplete quartet: missing {}",
                parity.missing.join(", ")
            ));
        }
        if parity.parity_score < self.config.parity_threshold {
            reasons.push(format!(
                "Parity {:.2} below threshold {:.2}",
                parity.parity_score, self.config.parity_threshold
            ));
        }
        if self.config.strict_mode && !parity.warnings.is_empty() {
            reasons.push(format!(
                "Strict mode: {} warnings present",
                parity.warnings.len()
            ));
        }

        let passed = reasons.is_empty();
        if passed {
            reasons.push("Parity gate passed".to_string());
        }

        tracing::debug!(
            gate = %self.config.gate_kind,
            passed,
            score = parity.parity_score,
            threshold = self.config.parity_threshold,
            "gate evaluated"
        );

        GateResult {
            gate_kind: self.config.gate_kind,
            passed,
            parity_score: parity.parity_score,
            threshold: self.config.parity_threshold,
            reasons,
            can_override: self.config.allow_override && !passed,
            warnings: parity.warnings.clone(),
        }
    }

    /// Compute parity for `quartet` with `calculator`, then evaluate.
    pub fn check(&self, quartet: &Quartet, calculator: &ParityCalculator) -> Result<GateResult, ConfigError> {
        let parity = calculator.calculate(quartet)?;
        Ok(self.evaluate(&parity))
    }
}
