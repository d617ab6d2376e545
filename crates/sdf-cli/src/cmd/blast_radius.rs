use std::path::Path;

use anyhow::Context;
use clap::Args;
use sdf_analysis::BlastRadiusAnalyzer;
use sdf_core::config::CliOverrides;

use super::load_config;
use crate::output::print_json;

#[derive(Args)]
pub struct BlastRadiusArgs {
    /// Factor above which the change is reported as high impact
    #[arg(long)]
    high_impact: Option<f64>,

    /// Changed files, relative to the root
    #[arg(required = true)]
    files: Vec<String>,
}

pub fn run(root: &Path, args: BlastRadiusArgs, json: bool) -> anyhow::Result<()> {
    let overrides = CliOverrides {
        high_impact_threshold: args.high_impact,
        ..CliOverrides::default()
    };
    let config = load_config(root, &overrides)?;

    let analyzer = BlastRadiusAnalyzer::from_config(root, &config.blast_radius)
        .context("building import graph")?;
    let result = analyzer.calculate_blast_radius(&args.files);
    let high_impact = analyzer.is_high_impact(&result);

    if json {
        return print_json(&serde_json::json!({
            "result": result,
            "high_impact": high_impact,
            "graph": analyzer.stats(),
        }));
    }

    println!("Changed: {}", result.directly_affected);
    println!("Transitively affected: {}", result.transitively_affected);
    println!("Total affected: {}", result.total_affected);
    println!("Blast radius factor: {:.2}", result.blast_radius_factor);
    if high_impact {
        println!(
            "HIGH IMPACT: factor above {:.2}",
            analyzer.high_impact_threshold()
        );
    }
    if !result.affected_files.is_empty() {
        println!();
        for file in &result.affected_files {
            println!("  {file}");
        }
    }
    Ok(())
}
