use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mann-Kendall trend analysis of environmental time series.
#[derive(Parser)]
#[command(
    name = "mannkendall",
    version,
    about = "Mann-Kendall trend test and Sen's slope with pre-whitening"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the trend test on a JSON observation file.
    Analyse(AnalyseArgs),
}

/// Arguments for the `analyse` subcommand.
#[derive(clap::Args)]
pub struct AnalyseArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "mk.toml")]
    pub config: PathBuf,

    /// Path to JSON observations.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the JSON results; printed to stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
