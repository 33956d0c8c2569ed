//! CLI frontend for the MEGS action resolution kernel.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::roll::RollArgs;

#[derive(Parser)]
#[command(
    name = "megs",
    about = "MEGS action resolution: Success Numbers, column shifts and Result APs",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one action against the tables
    Roll(RollArgs),

    /// Print the Action Table (or the Result Table) with range labels
    Tables {
        /// Tables JSON file (default: bundled tables)
        #[arg(short, long)]
        tables: Option<PathBuf>,

        /// Print the Result Table instead of the Action Table
        #[arg(short, long)]
        result: bool,
    },

    /// Validate a tables JSON file and list every problem found
    Check {
        /// Path to the tables JSON file
        path: PathBuf,
    },

    /// List the bundled combat maneuvers and their column shifts
    Maneuvers,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll(args) => commands::roll::run(&args).await,
        Commands::Tables { tables, result } => commands::tables::run(tables.as_deref(), result),
        Commands::Check { path } => commands::check::run(&path),
        Commands::Maneuvers => commands::maneuvers::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
