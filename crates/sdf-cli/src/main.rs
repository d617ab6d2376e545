mod cmd;
mod output;
mod root;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cmd::{
    blast_radius::BlastRadiusArgs, check::CheckArgs, dora::DoraArgs, hooks::HooksSubcommand,
};

#[derive(Parser)]
#[command(
    name = "sdf-cvf",
    about = "Quartet parity checks for code, docs, tests and traces",
    version,
    propagate_version = true
)]
struct Cli {
    /// Repository root (default: nearest sdf.toml or .git above the current directory)
    #[arg(long, global = true, env = "SDF_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the pre-commit parity hook (or `install-hooks uninstall`)
    InstallHooks {
        #[command(subcommand)]
        subcommand: Option<HooksSubcommand>,
    },

    /// Evaluate a parity gate over explicit files or the staged change set
    Check(CheckArgs),

    /// Classify files into the code/docs/tests/traces quartet
    Classify {
        /// Files to classify (default: staged files)
        files: Vec<String>,
    },

    /// Compute quartet parity for a change set
    Parity {
        /// Changed files (default: staged files)
        files: Vec<String>,
    },

    /// Modules affected by changing the given Python files
    BlastRadius(BlastRadiusArgs),

    /// Record deployments and incidents, report DORA metrics
    Dora(DoraArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    sdf_core::tracing::init_tracing("warn");

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::InstallHooks { subcommand } => cmd::hooks::run(&root, subcommand, cli.json),
        Commands::Check(args) => match cmd::check::run(&root, args, cli.json) {
            Ok(true) => Ok(()),
            Ok(false) => return ExitCode::FAILURE,
            Err(e) => Err(e),
        },
        Commands::Classify { files } => cmd::classify::run(&root, files, cli.json),
        Commands::Parity { files } => cmd::parity::run(&root, files, cli.json),
        Commands::BlastRadius(args) => cmd::blast_radius::run(&root, args, cli.json),
        Commands::Dora(args) => cmd::dora::run(&root, args, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Full context chain.
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
