//! Sample command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::commands::SAMPLE_MARKET;
use crate::error::CliError;
use crate::output::print_success;

/// Arguments for the sample command.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Write the sample to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the sample command.
pub fn execute(args: &SampleArgs) -> Result<()> {
    match &args.output {
        Some(path) => {
            std::fs::write(path, SAMPLE_MARKET).map_err(|source| CliError::File {
                path: path.clone(),
                source,
            })?;
            print_success(&format!("Wrote sample market data to {}", path.display()));
        }
        None => print!("{SAMPLE_MARKET}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use xccy_curves::MarketData;

    use super::SAMPLE_MARKET;

    #[test]
    fn test_sample_market_parses() {
        let market = MarketData::from_json(SAMPLE_MARKET).unwrap();
        assert_eq!(market.ccs_quotes.len(), 3);
        assert_eq!(market.ois_quotes.len(), 3);
        assert_eq!(market.config.spot_fx, 1400.0);
    }
}
