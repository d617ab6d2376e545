//! Human-readable gate output.

use std::fmt::Write;

use super::types::{GateConfig, GateKind, GateResult};
use crate::parity::ParityResult;
use crate::quartet::Quartet;

/// Multi-line report for a gate decision.
pub fn failure_message(config: &GateConfig, result: &GateResult) -> String {
    if result.passed {
        return "Parity gate PASSED".to_string();
    }

    let mut msg = String::new();
    let _ = writeln!(msg, "Parity Gate BLOCKED ({})", config.gate_kind);
    let _ = writeln!(msg);
    let _ = writeln!(
        msg,
        "Parity Score: {:.2} (threshold: {:.2})",
        result.parity_score, result.threshold
    );
    let _ = writeln!(msg);
    let _ = writeln!(msg, "Reasons:");
    for reason in &result.reasons {
        let _ = writeln!(msg, "  - {reason}");
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(msg);
        let _ = writeln!(msg, "Warnings:");
        for warning in &result.warnings {
            let _ = writeln!(msg, "  ! {warning}");
        }
    }

    let _ = writeln!(msg);
    if result.can_override {
        let _ = write!(
            msg,
            "Override available (not recommended): {}",
            override_hint(config.gate_kind)
        );
    } else {
        msg.push_str("No override available: fix quartet parity before proceeding");
    }
    msg
}

/// How an operator gets past a blocked gate of this kind.
fn override_hint(kind: GateKind) -> String {
    match kind {
        GateKind::PreCommit => "git commit --no-verify".to_string(),
        GateKind::PrePush => "git push --no-verify".to_string(),
        GateKind::PullRequest | GateKind::Deployment => format!(
            "lower parity_threshold under [gates.{}] in sdf.toml",
            kind.as_str().replace('-', "_")
        ),
    }
}

/// Output of the pre-commit hook: bucket counts, score, banner, and on
/// failure the first reason plus the bypass instruction.
pub fn hook_summary(quartet: &Quartet, parity: &ParityResult, result: &GateResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "SDF-CVF: Checking parity for {} files...", quartet.file_count());
    let _ = writeln!(out, "  Code: {}", quartet.code.len());
    let _ = writeln!(out, "  Docs: {}", quartet.docs.len());
    let _ = writeln!(out, "  Tests: {}", quartet.tests.len());
    let _ = writeln!(out, "  Traces: {}", quartet.traces.len());
    let _ = writeln!(out, "  Parity score: {:.3}", parity.parity_score);

    if result.passed {
        let _ = write!(
            out,
            "Parity check PASSED ({:.3} >= {:.2})",
            parity.parity_score, result.threshold
        );
    } else {
        let _ = writeln!(
            out,
            "Parity check FAILED ({:.3}, threshold {:.2})",
            parity.parity_score, result.threshold
        );
        if let Some(reason) = result.reasons.first() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Reason: {reason}");
        }
        let _ = writeln!(out);
        let _ = write!(out, "To bypass (not recommended): git commit --no-verify");
    }
    out
}
