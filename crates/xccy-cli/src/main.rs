//! xccy CLI - cross-currency discount curve bootstrapping from the command
//! line.
//!
//! # Usage
//!
//! ```bash
//! # Write a sample market file
//! xccy sample --output market.json
//!
//! # Bootstrap the USD discount curve from KRW/USD CCS quotes
//! xccy bootstrap --market market.json
//!
//! # Run the OIS/CCS fixed-point loop and show its history
//! xccy iterate --market market.json --format json
//!
//! # Price a 5Y payer swap on the projection curve, discounted on the CCS curve
//! xccy price-swap --market market.json --tenor 5Y --rate 4.0 --discount ccs
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library events go to stderr so JSON on stdout stays clean
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Bootstrap(args) => commands::bootstrap::execute(args, format)?,
        Commands::Iterate(args) => commands::iterate::execute(args, format)?,
        Commands::PriceSwap(args) => commands::price_swap::execute(args, format)?,
        Commands::Sample(args) => commands::sample::execute(&args)?,
    }

    Ok(())
}
