use std::path::Path;

use anyhow::Context;
use clap::Args;
use sdf_analysis::gates::{failure_message, hook_summary};
use sdf_analysis::{GateConfig, GateKind, ParityCalculator, ParityGate, QuartetDetector};
use sdf_core::config::CliOverrides;

use super::{files_or_staged, load_config};
use crate::output::print_json;

#[derive(Args)]
pub struct CheckArgs {
    /// Gate policy: pre-commit, pre-push, pull-request or deployment
    #[arg(long, default_value = "pre-commit")]
    gate: GateKind,

    /// Override the gate's parity threshold
    #[arg(long)]
    threshold: Option<f64>,

    /// Run as the pre-commit hook: pre-commit policy at the hook threshold
    #[arg(long)]
    hook: bool,

    /// Changed files (default: staged files)
    files: Vec<String>,
}

/// Returns whether the gate passed.
pub fn run(root: &Path, args: CheckArgs, json: bool) -> anyhow::Result<bool> {
    if let Some(t) = args.threshold {
        anyhow::ensure!(
            (0.0..=1.0).contains(&t),
            "--threshold must be within [0, 1], got {t}"
        );
    }

    let overrides = CliOverrides {
        hook_threshold: args.threshold.filter(|_| args.hook),
        ..CliOverrides::default()
    };
    let config = load_config(root, &overrides)?;

    let files = files_or_staged(root, args.files)?;
    if files.is_empty() {
        if json {
            print_json(&serde_json::json!({ "passed": true, "files": 0 }))?;
        } else {
            println!("No files staged");
        }
        return Ok(true);
    }

    let gate_config = if args.hook {
        GateConfig::hook(&config.gates)
    } else {
        let preset = GateConfig::for_kind(args.gate, &config.gates);
        match args.threshold {
            Some(t) => preset.with_threshold(t),
            None => preset,
        }
    };

    let quartet = QuartetDetector::new().detect_from_changes(&files);
    let calculator = ParityCalculator::from_config(root, config.parity.clone());
    let parity = calculator
        .calculate(&quartet)
        .context("calculating parity")?;
    let gate = ParityGate::new(gate_config);
    let result = gate.evaluate(&parity);

    ::tracing::debug!(
        gate = %gate_config.gate_kind,
        score = parity.parity_score,
        passed = result.passed,
        "gate evaluated"
    );

    if json {
        print_json(&serde_json::json!({
            "quartet": quartet,
            "parity": parity,
            "gate": result,
        }))?;
    } else {
        println!("{}", hook_summary(&quartet, &parity, &result));
        if !args.hook && !result.passed {
            println!();
            println!("{}", failure_message(&gate_config, &result));
        }
    }

    Ok(result.passed)
}
