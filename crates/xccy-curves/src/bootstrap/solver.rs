//! Single discount factor solver for one bootstrap pillar.
//!
//! The unknown discount factor at the pillar date enters the leg PV twice:
//! it discounts the cash flows at the pillar directly, and it is the right
//! anchor of the log-linear interpolation for cash flows between the last
//! solved pillar and the new one. Newton-Raphson runs on that PV with a
//! linearized derivative and a proportional-scaling fallback.

use serde::{Deserialize, Serialize};
use xccy_core::daycounts::DayCountConvention;
use xccy_core::Date;
use xccy_math::interpolation::{Extrapolation, Interpolator, LogLinearInterpolator};

use super::assembler::CurvePoint;
use crate::cashflows::CashflowPoint;
use crate::config::SolverSettings;
use crate::error::{CurveError, CurveResult};

/// Seed rate when only the anchor is known.
const SEED_RATE: f64 = 0.04;

/// Seed discount factor when the last known pillar sits at time zero.
const ZERO_TIME_SEED: f64 = 0.99;

/// Derivatives below this magnitude trigger the scaling fallback.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Outcome of a pillar solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DfSolution {
    /// Solved (or best-effort) discount factor at the pillar date.
    pub discount_factor: f64,
    /// Newton updates performed.
    pub iterations: u32,
    /// `PV - target` at the returned discount factor.
    pub residual: f64,
    /// Whether `|residual|` fell below the tolerance.
    pub converged: bool,
}

/// Solves the discount factor at a new pillar given the solved prefix.
///
/// Times are year fractions from the valuation date under the curve's day
/// count.
#[derive(Debug, Clone, Copy)]
pub struct DfSolver {
    valuation_date: Date,
    day_count: DayCountConvention,
    settings: SolverSettings,
}

impl DfSolver {
    /// Creates a solver on the given time axis.
    #[must_use]
    pub fn new(valuation_date: Date, day_count: DayCountConvention, settings: SolverSettings) -> Self {
        Self {
            valuation_date,
            day_count,
            settings,
        }
    }

    fn time(&self, date: Date) -> f64 {
        self.day_count.year_fraction(self.valuation_date, date)
    }

    /// Finds `df` at `target_date` such that the PV of `cashflows` equals
    /// `target_pv`.
    ///
    /// Cash flows after `target_date` are ignored. Non-convergence is not an
    /// error here: the best-effort discount factor is returned with
    /// `converged = false`.
    ///
    /// The interpolation-weight term of the derivative is applied even when
    /// the anchor is the only known point. Against an anchor of 1.0 the
    /// interpolated factor is `df^w`, so the term is the exact derivative
    /// there. Leaving it out gives the same root in more iterations.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InsufficientPoints` for an empty prefix and
    /// `CurveError::NonMonotonicDates` if `target_date` is not after the last
    /// known pillar.
    pub fn solve(
        &self,
        target_pv: f64,
        cashflows: &[CashflowPoint],
        known_points: &[CurvePoint],
        target_date: Date,
    ) -> CurveResult<DfSolution> {
        let Some(last) = known_points.last() else {
            return Err(CurveError::InsufficientPoints {
                required: 1,
                got: 0,
            });
        };
        if target_date <= last.date {
            return Err(CurveError::NonMonotonicDates {
                previous: last.date,
                date: target_date,
            });
        }

        let mut xs: Vec<f64> = known_points.iter().map(|p| self.time(p.date)).collect();
        let known_dfs: Vec<f64> = known_points.iter().map(|p| p.discount_factor).collect();
        let t_last = xs[xs.len() - 1];
        let t_target = self.time(target_date);
        xs.push(t_target);

        let flows: Vec<(f64, f64, bool)> = cashflows
            .iter()
            .filter(|cf| cf.payment_date <= target_date)
            .map(|cf| (self.time(cf.payment_date), cf.amount, cf.payment_date == target_date))
            .collect();

        let evaluate = |df: f64| -> CurveResult<(f64, f64)> {
            let mut ys = known_dfs.clone();
            ys.push(df);
            let interp = LogLinearInterpolator::new(xs.clone(), ys)?
                .with_extrapolation(Extrapolation::Flat);

            let mut pv = 0.0;
            let mut dpv = 0.0;
            for &(t, amount, at_target) in &flows {
                let df_i = interp.interpolate(t)?;
                pv += amount * df_i;
                if at_target {
                    dpv += amount;
                } else if t > t_last && t < t_target {
                    let w = (t - t_last) / (t_target - t_last);
                    dpv += amount * w * df_i / df;
                }
            }
            Ok((pv, dpv))
        };

        let settings = &self.settings;
        let mut df = initial_guess(known_points.len(), t_last, last.discount_factor, t_target);

        for iteration in 0..settings.max_iterations {
            let (pv, dpv) = evaluate(df)?;
            let residual = pv - target_pv;
            if residual.abs() < settings.tolerance {
                return Ok(DfSolution {
                    discount_factor: df,
                    iterations: iteration,
                    residual,
                    converged: true,
                });
            }

            df = if dpv.abs() > MIN_DERIVATIVE {
                df - residual / dpv
            } else if pv > 0.0 {
                df * target_pv / pv
            } else {
                df * 0.99
            };
            df = df.clamp(settings.min_discount_factor, settings.max_discount_factor);
        }

        let (pv, _) = evaluate(df)?;
        let residual = pv - target_pv;
        Ok(DfSolution {
            discount_factor: df,
            iterations: settings.max_iterations,
            residual,
            converged: residual.abs() < settings.tolerance,
        })
    }
}

fn initial_guess(known: usize, t_last: f64, df_last: f64, t_target: f64) -> f64 {
    if known <= 1 {
        (-SEED_RATE * t_target).exp()
    } else if t_last <= 0.0 {
        ZERO_TIME_SEED
    } else {
        let r_last = -df_last.ln() / t_last;
        (-r_last * t_target).exp()
    }
}
