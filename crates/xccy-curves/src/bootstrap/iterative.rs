//! Fixed-point loop between the projection curve and the CCS discount curve.
//!
//! The projection curve's par swaps are discounted on the CCS-implied curve,
//! while the CCS bootstrap projects its floating leg on the projection
//! curve. Starting from the self-discounted OIS curve, the two bootstraps
//! alternate until the zero rates at the reporting tenors stop moving.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use xccy_core::Tenor;

use super::ccs::{CcsBootstrapResult, CcsDiscountBootstrapper};
use super::projection::ProjectionBootstrapper;
use crate::analysis::zero_rates;
use crate::config::{default_report_tenors, CcsQuote};
use crate::curves::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Loop controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterativeBootstrapConfig {
    /// Maximum number of re-bootstrap rounds after the initial pass.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Convergence threshold on the max absolute zero rate change.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Tenors at which zero rates are tracked.
    #[serde(default = "default_report_tenors")]
    pub report_tenors: Vec<Tenor>,
}

fn default_max_iterations() -> u32 {
    10
}

fn default_tolerance() -> f64 {
    1e-10
}

impl Default for IterativeBootstrapConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            report_tenors: default_report_tenors(),
        }
    }
}

impl IterativeBootstrapConfig {
    /// Validates the controls.
    pub fn validate(&self) -> CurveResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CurveError::invalid_config("tolerance must be positive"));
        }
        if self.report_tenors.is_empty() {
            return Err(CurveError::invalid_config("report_tenors is empty"));
        }
        Ok(())
    }
}

/// Zero rates recorded after one round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationRecord {
    /// Round number, 0 for the self-discounted start.
    pub iteration: u32,
    /// Projection curve zero rates at the reporting tenors.
    pub projection_zero_rates: Vec<(Tenor, f64)>,
    /// Discount curve zero rates at the reporting tenors.
    pub discount_zero_rates: Vec<(Tenor, f64)>,
    /// Max absolute projection change from the previous round.
    pub max_projection_change: Option<f64>,
    /// Max absolute discount change from the previous round.
    pub max_discount_change: Option<f64>,
}

/// Output of [`IterativeBootstrapper::run`].
#[derive(Debug, Clone)]
pub struct IterativeBootstrapResult {
    /// Final projection curve, discounted on the CCS curve.
    pub projection_curve: Arc<DiscountCurve>,
    /// Final CCS-implied discount curve.
    pub discount_curve: Arc<DiscountCurve>,
    /// Final CCS bootstrap with pillar diagnostics.
    pub ccs: CcsBootstrapResult,
    /// One record per round.
    pub history: Vec<IterationRecord>,
    /// Whether both curves settled within tolerance.
    pub converged: bool,
    /// Rounds run after the initial pass.
    pub iterations: u32,
    /// Last projection change.
    pub max_projection_change: f64,
    /// Last discount change.
    pub max_discount_change: f64,
}

/// Runs the projection/discount fixed-point loop.
#[derive(Debug, Clone, Default)]
pub struct IterativeBootstrapper {
    config: IterativeBootstrapConfig,
}

impl IterativeBootstrapper {
    /// Creates the loop driver.
    #[must_use]
    pub fn new(config: IterativeBootstrapConfig) -> Self {
        Self { config }
    }

    /// Loop controls.
    #[must_use]
    pub fn config(&self) -> &IterativeBootstrapConfig {
        &self.config
    }

    /// Runs the loop.
    ///
    /// `ccs` must already hold its funding curve; its projection curve is
    /// replaced on a copy at every round.
    pub fn run(
        &self,
        ccs: &CcsDiscountBootstrapper,
        projection: &ProjectionBootstrapper,
        ois_quotes: &[(Tenor, f64)],
        ccs_quotes: &[CcsQuote],
    ) -> CurveResult<IterativeBootstrapResult> {
        self.config.validate()?;
        if ccs.funding_curve().is_none() {
            return Err(CurveError::missing_curve("funding discount curve"));
        }

        info!(
            max_iterations = self.config.max_iterations,
            tolerance = self.config.tolerance,
            "Starting iterative projection/discount bootstrap"
        );

        let mut bootstrapper = ccs.clone();
        let mut projection_curve = Arc::new(projection.bootstrap(ois_quotes, None)?);
        bootstrapper.set_projection_curve(projection_curve.clone());
        let mut ccs_result = bootstrapper.bootstrap_discount_curve(ccs_quotes)?;

        let mut history = vec![IterationRecord {
            iteration: 0,
            projection_zero_rates: self.snapshot(&*projection_curve, projection)?,
            discount_zero_rates: self.snapshot(&*ccs_result.curve, projection)?,
            max_projection_change: None,
            max_discount_change: None,
        }];

        let mut converged = false;
        let mut iterations = 0;
        let mut max_projection_change = f64::INFINITY;
        let mut max_discount_change = f64::INFINITY;

        for iteration in 1..=self.config.max_iterations {
            iterations = iteration;
            projection_curve = Arc::new(projection.bootstrap(ois_quotes, Some(&*ccs_result.curve as &dyn Curve))?);
            bootstrapper.set_projection_curve(projection_curve.clone());
            ccs_result = bootstrapper.bootstrap_discount_curve(ccs_quotes)?;

            let projection_zeros = self.snapshot(&*projection_curve, projection)?;
            let discount_zeros = self.snapshot(&*ccs_result.curve, projection)?;
            let previous = history.last().ok_or_else(|| CurveError::invalid_value("empty history"))?;
            max_projection_change = max_change(&previous.projection_zero_rates, &projection_zeros);
            max_discount_change = max_change(&previous.discount_zero_rates, &discount_zeros);

            debug!(
                iteration,
                max_projection_change,
                max_discount_change,
                "Iteration complete"
            );

            history.push(IterationRecord {
                iteration,
                projection_zero_rates: projection_zeros,
                discount_zero_rates: discount_zeros,
                max_projection_change: Some(max_projection_change),
                max_discount_change: Some(max_discount_change),
            });

            if max_projection_change < self.config.tolerance && max_discount_change < self.config.tolerance {
                converged = true;
                break;
            }
        }

        if converged {
            info!(iterations, "Iterative bootstrap converged");
        } else {
            warn!(
                iterations,
                max_projection_change,
                max_discount_change,
                tolerance = self.config.tolerance,
                "Iterative bootstrap hit the iteration cap"
            );
        }

        Ok(IterativeBootstrapResult {
            projection_curve,
            discount_curve: Arc::clone(&ccs_result.curve),
            ccs: ccs_result,
            history,
            converged,
            iterations,
            max_projection_change,
            max_discount_change,
        })
    }

    fn snapshot(&self, curve: &dyn Curve, projection: &ProjectionBootstrapper) -> CurveResult<Vec<(Tenor, f64)>> {
        Ok(zero_rates(curve, &self.config.report_tenors, projection.calendar())?
            .into_iter()
            .map(|p| (p.tenor, p.value))
            .collect())
    }
}

fn max_change(previous: &[(Tenor, f64)], current: &[(Tenor, f64)]) -> f64 {
    previous
        .iter()
        .zip(current)
        .map(|((_, a), (_, b))| (b - a).abs())
        .fold(0.0, f64::max)
}
