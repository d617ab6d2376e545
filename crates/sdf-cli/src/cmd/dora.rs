use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use sdf_core::config::CliOverrides;
use sdf_storage::dora::{render_report, DoraReport, DoraStore};

use super::load_config;
use crate::output::print_json;

#[derive(Args)]
pub struct DoraArgs {
    /// Metrics database (default: dora.db_path from config, relative to the root)
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    subcommand: DoraSubcommand,
}

#[derive(Subcommand)]
pub enum DoraSubcommand {
    /// Record a deployment and print its id
    RecordDeployment {
        /// Released version, e.g. v1.2.3
        #[arg(long)]
        release: String,
        /// Deployed commit SHA
        #[arg(long)]
        commit: String,
        /// Quartet parity of the deployed commit
        #[arg(long)]
        parity: Option<f64>,
        /// Minutes from commit to deployment
        #[arg(long)]
        lead_time: i64,
        /// The deployment failed
        #[arg(long)]
        failed: bool,
    },
    /// Record an incident against a deployment
    RecordIncident {
        deployment_id: i64,
        /// Resolution time, RFC 3339 (default: now)
        #[arg(long)]
        resolved_at: Option<String>,
        /// The incident was not caused by the deployment
        #[arg(long)]
        not_caused_by_deployment: bool,
    },
    /// Four Key Metrics for a window, plus parity correlation over dora.correlation_window_days
    Report {
        /// Window in days (default: dora.window_days)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Success rate at or above a parity threshold vs below it
    Impact {
        /// Threshold (default: dora.high_parity_cutoff)
        #[arg(long)]
        min_parity: Option<f64>,
    },
}

pub fn run(root: &Path, args: DoraArgs, json: bool) -> anyhow::Result<()> {
    let window_days = match &args.subcommand {
        DoraSubcommand::Report { days } => *days,
        _ => None,
    };
    let overrides = CliOverrides {
        dora_db_path: args.db,
        window_days,
        ..CliOverrides::default()
    };
    let config = load_config(root, &overrides)?;

    let db_path = resolve_db_path(root, config.dora.effective_db_path());
    let store = DoraStore::open(&db_path, &config.dora)
        .with_context(|| format!("opening metrics database {}", db_path.display()))?;

    match args.subcommand {
        DoraSubcommand::RecordDeployment {
            release,
            commit,
            parity,
            lead_time,
            failed,
        } => {
            if let Some(p) = parity {
                anyhow::ensure!((0.0..=1.0).contains(&p), "--parity must be within [0, 1], got {p}");
            }
            anyhow::ensure!(lead_time >= 0, "--lead-time must not be negative");
            let id = store.record_deployment(&release, &commit, parity, !failed, lead_time)?;
            if json {
                print_json(&serde_json::json!({ "deployment_id": id }))
            } else {
                println!("Recorded deployment {id}");
                Ok(())
            }
        }
        DoraSubcommand::RecordIncident {
            deployment_id,
            resolved_at,
            not_caused_by_deployment,
        } => {
            let resolved_at = match resolved_at {
                Some(s) => DateTime::parse_from_rfc3339(&s)
                    .with_context(|| format!("invalid --resolved-at '{s}'"))?
                    .with_timezone(&Utc),
                None => Utc::now(),
            };
            let id = store.record_incident(deployment_id, resolved_at, !not_caused_by_deployment)?;
            if json {
                print_json(&serde_json::json!({ "incident_id": id, "deployment_id": deployment_id }))
            } else {
                println!("Recorded incident {id} for deployment {deployment_id}");
                Ok(())
            }
        }
        DoraSubcommand::Report { .. } => {
            let report = DoraReport::collect(&store, config.dora.effective_window_days())?;
            if json {
                print_json(&report)
            } else {
                print!("{}", render_report(&report));
                Ok(())
            }
        }
        DoraSubcommand::Impact { min_parity } => {
            let min = min_parity.unwrap_or_else(|| config.dora.effective_high_parity_cutoff());
            let impact = store.get_parity_impact(min)?;
            if json {
                return print_json(&impact);
            }
            println!(
                "Parity >= {min}: {} deployments, {:.1}% successful",
                impact.high_count,
                impact.high_success_rate * 100.0
            );
            println!(
                "Parity <  {min}: {} deployments, {:.1}% successful",
                impact.low_count,
                impact.low_success_rate * 100.0
            );
            match (&impact.insight, &impact.note) {
                (Some(insight), _) => println!("{insight}"),
                (None, Some(note)) => println!("{note}"),
                (None, None) => {}
            }
            Ok(())
        }
    }
}

fn resolve_db_path(root: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
