//! Price-swap command implementation.
//!
//! Prices a single-currency fixed/floating swap, projecting on the market's
//! projection curve and discounting on a chosen curve.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use xccy_core::Tenor;
use xccy_curves::config::SwapConventions;
use xccy_curves::swap::{SwapDirection, SwapValuation, VanillaSwap};
use xccy_curves::Curve;

use crate::cli::OutputFormat;
use crate::commands::{apply_overrides, funded_bootstrapper, load_market, projection_curve};
use crate::error::CliError;
use crate::output::{format_percent, print_header, print_info, print_json, print_table, KeyValue};

/// Arguments for the price-swap command.
#[derive(Args, Debug)]
pub struct PriceSwapArgs {
    /// Market data JSON file. Defaults to the bundled sample.
    #[arg(short, long)]
    pub market: Option<PathBuf>,

    /// Swap tenor (e.g. 5Y, 18M)
    #[arg(short, long)]
    pub tenor: String,

    /// Fixed rate in percent
    #[arg(short, long)]
    pub rate: f64,

    /// Notional
    #[arg(short, long, default_value_t = 1_000_000.0)]
    pub notional: f64,

    /// Floating spread in basis points
    #[arg(long, default_value_t = 0.0)]
    pub spread_bps: f64,

    /// Fixed leg side
    #[arg(long, value_enum, default_value = "payer")]
    pub direction: DirectionChoice,

    /// Leg conventions
    #[arg(long, value_enum, default_value = "ois")]
    pub conventions: ConventionChoice,

    /// Discounting curve
    #[arg(long, value_enum, default_value = "projection")]
    pub discount: DiscountChoice,
}

/// Fixed leg side choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum DirectionChoice {
    /// Pay fixed
    #[default]
    Payer,
    /// Receive fixed
    Receiver,
}

impl From<DirectionChoice> for SwapDirection {
    fn from(choice: DirectionChoice) -> Self {
        match choice {
            DirectionChoice::Payer => SwapDirection::Payer,
            DirectionChoice::Receiver => SwapDirection::Receiver,
        }
    }
}

/// Leg convention choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ConventionChoice {
    /// Annual ACT/360 on both legs
    #[default]
    Ois,
    /// Annual 30/360 fixed, quarterly ACT/360 floating
    Irs,
}

/// Discount curve choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum DiscountChoice {
    /// Discount on the projection curve
    #[default]
    Projection,
    /// Discount on the CCS-implied curve
    Ccs,
}

#[derive(Serialize)]
struct PriceOutput<'a> {
    swap: &'a VanillaSwap,
    discount: &'static str,
    valuation: &'a SwapValuation,
}

/// Execute the price-swap command.
pub fn execute(args: PriceSwapArgs, format: OutputFormat) -> Result<()> {
    let mut market = load_market(args.market.as_deref())?;
    apply_overrides(&mut market, None, None, false)?;

    let tenor: Tenor = args
        .tenor
        .parse()
        .map_err(|e| CliError::InvalidArgument(format!("tenor {}: {e}", args.tenor)))?;
    if !args.rate.is_finite() {
        return Err(CliError::InvalidArgument("rate must be finite".into()).into());
    }

    let base = match args.conventions {
        ConventionChoice::Ois => SwapConventions::ois(),
        ConventionChoice::Irs => SwapConventions::irs(),
    };
    let conventions = SwapConventions {
        settlement_days: market.config.settlement_days,
        ..base
    };
    let swap = VanillaSwap::new(args.direction.into(), args.notional, tenor, args.rate / 100.0, conventions)
        .with_spread(args.spread_bps / 10_000.0);

    let forward = projection_curve(&market)?;
    let (discount, discount_name): (Arc<dyn Curve>, &'static str) = match args.discount {
        DiscountChoice::Projection => (Arc::clone(&forward), "projection"),
        DiscountChoice::Ccs => {
            let mut ccs = funded_bootstrapper(&market)?;
            ccs.set_projection_curve(Arc::clone(&forward));
            let curve: Arc<dyn Curve> = ccs.bootstrap_discount_curve(&market.ccs_quotes)?.curve;
            (curve, "ccs")
        }
    };

    let valuation = swap.price(
        market.config.valuation_date,
        &market.config.base_leg.calendar,
        &*forward,
        &*discount,
    )?;

    match format {
        OutputFormat::Table => {
            print_header("Swap Valuation");
            print_info(&format!(
                "{} {} {} at {:.4}%, discounted on the {} curve",
                swap.direction, swap.tenor, swap.notional, args.rate, discount_name
            ));
            let rows = vec![
                KeyValue::new("Start Date", valuation.start_date.to_string()),
                KeyValue::new("Maturity Date", valuation.maturity_date.to_string()),
                KeyValue::new("NPV", format!("{:.2}", valuation.npv)),
                KeyValue::new("Fixed Leg NPV", format!("{:.2}", valuation.fixed_leg_npv)),
                KeyValue::new("Floating Leg NPV", format!("{:.2}", valuation.floating_leg_npv)),
                KeyValue::new("Fair Rate (%)", format_percent(valuation.fair_rate)),
                KeyValue::new("Fair Spread (bps)", format!("{:.2}", valuation.fair_spread * 10_000.0)),
            ];
            print_table(&rows);
        }
        OutputFormat::Json => {
            print_json(&PriceOutput {
                swap: &swap,
                discount: discount_name,
                valuation: &valuation,
            })?;
        }
    }

    Ok(())
}
