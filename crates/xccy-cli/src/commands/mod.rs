//! CLI command implementations.

pub mod bootstrap;
pub mod iterate;
pub mod price_swap;
pub mod sample;

pub use bootstrap::BootstrapArgs;
pub use iterate::IterateArgs;
pub use price_swap::PriceSwapArgs;
pub use sample::SampleArgs;

use std::path::Path;
use std::sync::Arc;

use xccy_core::Date;
use xccy_curves::bootstrap::ProjectionBootstrapper;
use xccy_curves::config::SwapConventions;
use xccy_curves::{CcsDiscountBootstrapper, Curve, MarketData};

use crate::error::{CliError, CliResult};

/// Market data used when no `--market` file is given.
pub const SAMPLE_MARKET: &str = include_str!("../../data/sample_market.json");

/// Loads market data from a file, or the bundled sample.
pub fn load_market(path: Option<&Path>) -> CliResult<MarketData> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::File {
            path: path.to_path_buf(),
            source,
        })?,
        None => SAMPLE_MARKET.to_string(),
    };
    Ok(MarketData::from_json(&json)?)
}

/// Applies command-line overrides to the market configuration.
pub fn apply_overrides(
    market: &mut MarketData,
    valuation_date: Option<&str>,
    spot_fx: Option<f64>,
    strict: bool,
) -> CliResult<()> {
    if let Some(date) = valuation_date {
        market.config.valuation_date = parse_date(date)?;
    }
    if let Some(fx) = spot_fx {
        market.config.spot_fx = fx;
    }
    market.config.solver.strict |= strict;
    market.validate()?;
    Ok(())
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidArgument(format!("{s} is not a YYYY-MM-DD date")))
}

/// OIS bootstrapper on the base-leg calendar.
pub fn ois_bootstrapper(market: &MarketData) -> ProjectionBootstrapper {
    let conventions = SwapConventions {
        settlement_days: market.config.settlement_days,
        ..SwapConventions::ois()
    };
    ProjectionBootstrapper::new(
        market.config.valuation_date,
        market.config.base_leg.calendar.clone(),
        conventions,
    )
    .with_solver_settings(market.config.solver)
}

/// CCS bootstrapper with the funding curve built.
pub fn funded_bootstrapper(market: &MarketData) -> CliResult<CcsDiscountBootstrapper> {
    let mut bootstrapper = CcsDiscountBootstrapper::new(market.config.clone())?;
    bootstrapper.build_funding_discount_curve(&market.funding_rates())?;
    Ok(bootstrapper)
}

/// Projection curve from zero rates when given, otherwise self-discounted
/// OIS.
pub fn projection_curve(market: &MarketData) -> CliResult<Arc<dyn Curve>> {
    if market.projection_zero_rates.is_empty() {
        let curve = ois_bootstrapper(market).bootstrap(&market.ois_rates(), None)?;
        return Ok(Arc::new(curve));
    }
    let mut scratch = CcsDiscountBootstrapper::new(market.config.clone())?;
    Ok(scratch.build_projection_curve(&market.projection_rates())?)
}
