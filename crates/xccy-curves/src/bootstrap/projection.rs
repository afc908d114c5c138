//! Sequential par-swap bootstrap of a projection curve.
//!
//! Each quote is a single-currency swap at par. Working in maturity order,
//! the discount factor at the swap's last schedule date is solved with
//! Brent so that the fixed leg equals the floating leg, whose forwards come
//! from the curve being built. Discounting is either on that same curve
//! (standard OIS) or on an external curve such as a funding or CCS-implied
//! discount curve.

use std::cell::RefCell;

use tracing::{debug, info};
use xccy_core::calendars::{BusinessDayConvention, Calendar, HolidayCalendar};
use xccy_core::schedule::Schedule;
use xccy_core::{Date, Tenor};
use xccy_math::solvers::{brent, SolverConfig};

use super::assembler::{CurveAssembler, CurvePoint};
use crate::config::{SolverSettings, SwapConventions};
use crate::curves::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Bootstraps a log-linear discount-factor projection curve from par swap
/// rates.
///
/// ```rust
/// use xccy_core::prelude::*;
/// use xccy_curves::bootstrap::ProjectionBootstrapper;
/// use xccy_curves::config::SwapConventions;
/// use xccy_curves::Curve;
///
/// let valuation = Date::from_ymd(2024, 12, 11).unwrap();
/// let ois = ProjectionBootstrapper::new(
///     valuation,
///     HolidayCalendar::weekends_only("USD"),
///     SwapConventions::ois(),
/// );
/// let curve = ois
///     .bootstrap(&[(Tenor::years(1), 0.04), (Tenor::years(5), 0.04)], None)
///     .unwrap();
/// assert!(curve.discount_factor(3.0).unwrap() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProjectionBootstrapper {
    valuation_date: Date,
    calendar: HolidayCalendar,
    conventions: SwapConventions,
    settings: SolverSettings,
}

struct SwapLegs {
    tenor: Tenor,
    rate: f64,
    end: Date,
    fixed: Schedule,
    floating: Schedule,
}

impl ProjectionBootstrapper {
    /// Creates a bootstrapper with default solver settings.
    #[must_use]
    pub fn new(valuation_date: Date, calendar: HolidayCalendar, conventions: SwapConventions) -> Self {
        Self {
            valuation_date,
            calendar,
            conventions,
            settings: SolverSettings::default(),
        }
    }

    /// Replaces the solver settings.
    #[must_use]
    pub fn with_solver_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The leg conventions.
    #[must_use]
    pub fn conventions(&self) -> &SwapConventions {
        &self.conventions
    }

    /// The business day calendar.
    #[must_use]
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Bootstraps the curve from `(tenor, par_rate)` quotes.
    ///
    /// With `discount = None` the swaps are discounted on the curve being
    /// built.
    ///
    /// # Errors
    ///
    /// - `CurveError::InvalidConfig` for an empty or non-finite quote list
    /// - `CurveError::DuplicateMaturity` if two quotes roll to the same date
    /// - `CurveError::CalibrationFailure` if a pillar has no root in the
    ///   discount factor bounds
    pub fn bootstrap(
        &self,
        quotes: &[(Tenor, f64)],
        discount: Option<&dyn Curve>,
    ) -> CurveResult<DiscountCurve> {
        self.settings.validate()?;
        let swaps = self.build_swaps(quotes)?;

        info!(
            valuation = %self.valuation_date,
            quotes = swaps.len(),
            self_discounted = discount.is_none(),
            "Bootstrapping projection curve"
        );

        let brent_config = SolverConfig::new(self.settings.tolerance, self.settings.max_iterations);
        let day_count = self.conventions.floating_day_count;
        let mut assembler = CurveAssembler::new(self.valuation_date);

        for swap in &swaps {
            let failure: RefCell<Option<CurveError>> = RefCell::new(None);
            let objective = |df: f64| match self.par_swap_npv(swap, assembler.points(), df, discount) {
                Ok(npv) => npv,
                Err(e) => {
                    failure.borrow_mut().get_or_insert(e);
                    f64::NAN
                }
            };

            let solved = brent(
                objective,
                self.settings.min_discount_factor,
                self.settings.max_discount_factor,
                &brent_config,
            );
            if let Some(e) = failure.into_inner() {
                return Err(e);
            }
            let solved = solved.map_err(|e| {
                CurveError::calibration_failed(
                    self.settings.max_iterations,
                    f64::NAN,
                    format!("{} projection pillar: {e}", swap.tenor),
                )
            })?;

            debug!(
                tenor = %swap.tenor,
                end = %swap.end,
                rate = swap.rate,
                df = solved.root,
                iterations = solved.iterations,
                "Solved projection pillar"
            );
            assembler.append(swap.end, solved.root)?;
        }

        assembler.finalize(day_count)
    }

    fn build_swaps(&self, quotes: &[(Tenor, f64)]) -> CurveResult<Vec<SwapLegs>> {
        if quotes.is_empty() {
            return Err(CurveError::invalid_config("no swap quotes"));
        }

        let lag = i32::try_from(self.conventions.settlement_days)
            .map_err(|_| CurveError::invalid_config("settlement_days is too large"))?;
        let start = self.calendar.add_business_days(self.valuation_date, lag);

        let mut swaps = Vec::with_capacity(quotes.len());
        for &(tenor, rate) in quotes {
            if !rate.is_finite() {
                return Err(CurveError::invalid_config(format!("{tenor} quote is not finite")));
            }
            let maturity = self
                .calendar
                .advance(start, tenor, BusinessDayConvention::Following)?;
            let fixed = Schedule::generate(
                start,
                maturity,
                self.conventions.fixed_frequency,
                &self.calendar,
                BusinessDayConvention::ModifiedFollowing,
            )?;
            let floating = Schedule::generate(
                start,
                maturity,
                self.conventions.floating_frequency,
                &self.calendar,
                BusinessDayConvention::ModifiedFollowing,
            )?;
            swaps.push(SwapLegs {
                tenor,
                rate,
                end: fixed.end_date().max(floating.end_date()),
                fixed,
                floating,
            });
        }

        swaps.sort_by_key(|s| s.end);
        if let Some(pair) = swaps.windows(2).find(|w| w[0].end == w[1].end) {
            return Err(CurveError::DuplicateMaturity {
                date: pair[0].end,
                first: pair[0].tenor.to_string(),
                second: pair[1].tenor.to_string(),
            });
        }
        Ok(swaps)
    }

    /// Fixed leg PV minus floating leg PV for a trial pillar value.
    fn par_swap_npv(
        &self,
        swap: &SwapLegs,
        known: &[CurvePoint],
        df: f64,
        discount: Option<&dyn Curve>,
    ) -> CurveResult<f64> {
        let mut points = known.to_vec();
        points.push(CurvePoint::new(swap.end, df));
        let (dates, dfs): (Vec<Date>, Vec<f64>) =
            points.iter().map(|p| (p.date, p.discount_factor)).unzip();
        let trial = DiscountCurve::new(dates, dfs, self.conventions.floating_day_count)?;
        let discounting: &dyn Curve = discount.unwrap_or(&trial);

        let fixed_dc = self.conventions.fixed_day_count.to_day_count();
        let floating_dc = self.conventions.floating_day_count.to_day_count();

        let mut fixed_pv = 0.0;
        for (s, e) in swap.fixed.periods() {
            fixed_pv += swap.rate * fixed_dc.year_fraction_f64(s, e) * discounting.discount(e)?;
        }

        let mut floating_pv = 0.0;
        for (s, e) in swap.floating.periods() {
            let forward = trial.forward_rate_between(s, e, floating_dc.as_ref())?;
            floating_pv += forward * floating_dc.year_fraction_f64(s, e) * discounting.discount(e)?;
        }

        Ok(fixed_pv - floating_pv)
    }
}
