//! Iterate command implementation.
//!
//! Alternates the OIS projection bootstrap and the CCS discount bootstrap
//! until both curves stop moving.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use xccy_curves::analysis::ccs_basis;
use xccy_curves::bootstrap::{IterationRecord, IterativeBootstrapConfig, IterativeBootstrapper};

use crate::cli::OutputFormat;
use crate::commands::{apply_overrides, funded_bootstrapper, load_market, ois_bootstrapper};
use crate::error::CliError;
use crate::output::{format_bps, format_percent, print_header, print_json, print_success, print_table, print_warning};

/// Arguments for the iterate command.
#[derive(Args, Debug)]
pub struct IterateArgs {
    /// Market data JSON file. Defaults to the bundled sample.
    #[arg(short, long)]
    pub market: Option<PathBuf>,

    /// Maximum re-bootstrap rounds
    #[arg(long, default_value_t = 10)]
    pub max_iterations: u32,

    /// Convergence threshold on zero rate changes
    #[arg(long, default_value_t = 1e-10)]
    pub tolerance: f64,

    /// Override the valuation date (YYYY-MM-DD)
    #[arg(long)]
    pub valuation_date: Option<String>,

    /// Override the spot FX rate
    #[arg(long)]
    pub spot_fx: Option<f64>,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Iteration")]
    iteration: u32,
    #[tabled(rename = "Max Proj Change")]
    projection_change: String,
    #[tabled(rename = "Max Disc Change")]
    discount_change: String,
}

impl From<&IterationRecord> for HistoryRow {
    fn from(record: &IterationRecord) -> Self {
        let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.3e}"));
        Self {
            iteration: record.iteration,
            projection_change: fmt(record.max_projection_change),
            discount_change: fmt(record.max_discount_change),
        }
    }
}

#[derive(Tabled)]
struct CurveRow {
    #[tabled(rename = "Tenor")]
    tenor: String,
    #[tabled(rename = "OIS Zero (%)")]
    projection: String,
    #[tabled(rename = "CCS Zero (%)")]
    discount: String,
    #[tabled(rename = "Basis (bps)")]
    basis: String,
}

#[derive(Serialize)]
struct IterateOutput<'a> {
    converged: bool,
    iterations: u32,
    max_projection_change: f64,
    max_discount_change: f64,
    history: &'a [IterationRecord],
}

/// Execute the iterate command.
pub fn execute(args: IterateArgs, format: OutputFormat) -> Result<()> {
    let mut market = load_market(args.market.as_deref())?;
    apply_overrides(&mut market, args.valuation_date.as_deref(), args.spot_fx, false)?;
    if market.ois_quotes.is_empty() {
        return Err(CliError::MissingData("the iterate command needs ois_quotes".into()).into());
    }

    let config = IterativeBootstrapConfig {
        max_iterations: args.max_iterations,
        tolerance: args.tolerance,
        report_tenors: market.report_tenors.clone(),
    };
    let ccs = funded_bootstrapper(&market)?;
    let ois = ois_bootstrapper(&market);

    let result = IterativeBootstrapper::new(config).run(&ccs, &ois, &market.ois_rates(), &market.ccs_quotes)?;

    match format {
        OutputFormat::Table => {
            print_header("Iteration History");
            let rows: Vec<HistoryRow> = result.history.iter().map(HistoryRow::from).collect();
            print_table(&rows);

            print_header("Final Curves");
            let basis = ccs_basis(
                &*result.projection_curve,
                &*result.discount_curve,
                &market.report_tenors,
                &market.config.base_leg.calendar,
            )?;
            let rows: Vec<CurveRow> = basis
                .iter()
                .map(|b| CurveRow {
                    tenor: b.tenor.to_string(),
                    projection: format_percent(b.projection_zero),
                    discount: format_percent(b.discount_zero),
                    basis: format_bps(b.basis_bps),
                })
                .collect();
            print_table(&rows);

            if result.converged {
                print_success(&format!("Converged after {} iterations", result.iterations));
            } else {
                print_warning(&format!(
                    "Stopped after {} iterations without reaching {:e}",
                    result.iterations, args.tolerance
                ));
            }
        }
        OutputFormat::Json => {
            print_json(&IterateOutput {
                converged: result.converged,
                iterations: result.iterations,
                max_projection_change: result.max_projection_change,
                max_discount_change: result.max_discount_change,
                history: &result.history,
            })?;
        }
    }

    Ok(())
}
