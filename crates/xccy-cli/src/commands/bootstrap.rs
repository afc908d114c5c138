//! Bootstrap command implementation.
//!
//! Bootstraps the base-currency discount curve from cross-currency swap
//! quotes and reports it against the projection curve.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use xccy_curves::analysis::{ccs_basis, discount_factors, BasisPoint};
use xccy_curves::PillarReport;

use crate::cli::OutputFormat;
use crate::commands::{apply_overrides, funded_bootstrapper, load_market, projection_curve};
use crate::output::{format_bps, format_percent, print_header, print_json, print_success, print_table, print_warning};

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// Market data JSON file. Defaults to the bundled sample.
    #[arg(short, long)]
    pub market: Option<PathBuf>,

    /// Override the valuation date (YYYY-MM-DD)
    #[arg(long)]
    pub valuation_date: Option<String>,

    /// Override the spot FX rate (funding units per base unit)
    #[arg(long)]
    pub spot_fx: Option<f64>,

    /// Fail on any pillar that misses the solver tolerance
    #[arg(long)]
    pub strict: bool,
}

#[derive(Tabled)]
struct PillarRow {
    #[tabled(rename = "Tenor")]
    tenor: String,
    #[tabled(rename = "End Date")]
    end_date: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
    #[tabled(rename = "Zero Rate (%)")]
    zero_rate: String,
    #[tabled(rename = "Iterations")]
    iterations: u32,
    #[tabled(rename = "Residual")]
    residual: String,
}

impl From<&PillarReport> for PillarRow {
    fn from(p: &PillarReport) -> Self {
        Self {
            tenor: p.tenor.to_string(),
            end_date: p.end_date.to_string(),
            discount_factor: format!("{:.8}", p.discount_factor),
            zero_rate: format_percent(p.zero_rate),
            iterations: p.iterations,
            residual: format!("{:.3e}", p.residual),
        }
    }
}

#[derive(Tabled)]
struct BasisRow {
    #[tabled(rename = "Tenor")]
    tenor: String,
    #[tabled(rename = "Projection (%)")]
    projection: String,
    #[tabled(rename = "Discount (%)")]
    discount: String,
    #[tabled(rename = "Basis (bps)")]
    basis: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
}

#[derive(Serialize)]
struct BootstrapOutput<'a> {
    valuation_date: String,
    start_date: String,
    spot_fx: f64,
    all_converged: bool,
    pillars: &'a [PillarReport],
    basis: &'a [BasisPoint],
}

/// Execute the bootstrap command.
pub fn execute(args: BootstrapArgs, format: OutputFormat) -> Result<()> {
    let mut market = load_market(args.market.as_deref())?;
    apply_overrides(&mut market, args.valuation_date.as_deref(), args.spot_fx, args.strict)?;

    let mut bootstrapper = funded_bootstrapper(&market)?;
    let projection = projection_curve(&market)?;
    bootstrapper.set_projection_curve(projection.clone());

    let result = bootstrapper.bootstrap_discount_curve(&market.ccs_quotes)?;

    let calendar = &market.config.base_leg.calendar;
    let basis = ccs_basis(&*projection, &*result.curve, &market.report_tenors, calendar)?;
    let dfs = discount_factors(&*result.curve, &market.report_tenors, calendar)?;

    match format {
        OutputFormat::Table => {
            print_header("Cross-Currency Discount Curve");
            println!("Valuation Date: {}", market.config.valuation_date);
            println!("Start Date:     {}", result.start_date);
            println!("Spot FX:        {}", market.config.spot_fx);
            println!();

            let rows: Vec<PillarRow> = result.pillars.iter().map(PillarRow::from).collect();
            print_table(&rows);

            print_header("Projection vs Discount");
            let rows: Vec<BasisRow> = basis
                .iter()
                .zip(&dfs)
                .map(|(b, df)| BasisRow {
                    tenor: b.tenor.to_string(),
                    projection: format_percent(b.projection_zero),
                    discount: format_percent(b.discount_zero),
                    basis: format_bps(b.basis_bps),
                    discount_factor: format!("{:.8}", df.value),
                })
                .collect();
            print_table(&rows);

            if result.all_converged() {
                print_success("All pillars converged");
            } else {
                print_warning("Some pillars stopped short of the solver tolerance; see the residual column");
            }
        }
        OutputFormat::Json => {
            print_json(&BootstrapOutput {
                valuation_date: market.config.valuation_date.to_string(),
                start_date: result.start_date.to_string(),
                spot_fx: market.config.spot_fx,
                all_converged: result.all_converged(),
                pillars: &result.pillars,
                basis: &basis,
            })?;
        }
    }

    Ok(())
}
