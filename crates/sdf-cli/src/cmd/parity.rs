use std::path::Path;

use anyhow::Context;
use sdf_analysis::{ParityCalculator, QuartetDetector};
use sdf_core::config::CliOverrides;

use super::{files_or_staged, load_config};
use crate::output::print_json;

pub fn run(root: &Path, files: Vec<String>, json: bool) -> anyhow::Result<()> {
    let config = load_config(root, &CliOverrides::default())?;
    let files = files_or_staged(root, files)?;

    let quartet = QuartetDetector::new().detect_from_changes(&files);
    let calculator = ParityCalculator::from_config(root, config.parity);
    let result = calculator
        .calculate(&quartet)
        .context("calculating parity")?;
    let weighted = calculator.weighted_parity(&result)?;

    if json {
        return print_json(&serde_json::json!({
            "quartet": quartet,
            "parity": result,
            "weighted_parity": weighted,
        }));
    }

    println!("Quartet: {} files", quartet.file_count());
    println!(
        "  Code: {}  Docs: {}  Tests: {}  Traces: {}",
        quartet.code.len(),
        quartet.docs.len(),
        quartet.tests.len(),
        quartet.traces.len()
    );
    println!("Parity score: {:.3}", result.parity_score);
    if result.complete {
        println!("  code<->docs:   {:.3}", result.code_docs_similarity);
        println!("  code<->tests:  {:.3}", result.code_tests_similarity);
        println!("  code<->traces: {:.3}", result.code_traces_similarity);
        println!("  weighted:      {weighted:.3}");
    }
    for warning in &result.warnings {
        println!("  ! {warning}");
    }
    Ok(())
}
