//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BootstrapArgs, IterateArgs, PriceSwapArgs, SampleArgs};

/// xccy - Cross-currency discount curve bootstrapping
#[derive(Parser)]
#[command(name = "xccy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap the base-currency discount curve from cross-currency swaps
    Bootstrap(BootstrapArgs),

    /// Iterate projection and CCS bootstraps to a fixed point
    Iterate(IterateArgs),

    /// Price a vanilla fixed/floating swap
    PriceSwap(PriceSwapArgs),

    /// Print or write a sample market data file
    Sample(SampleArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}
