//! Cross-currency swap bootstrap of the base-currency discount curve.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use xccy_core::calendars::{BusinessDayConvention, Calendar};
use xccy_core::schedule::Schedule;
use xccy_core::{Date, Tenor};

use super::assembler::CurveAssembler;
use super::solver::{DfSolution, DfSolver};
use crate::cashflows::{project_fixed_leg, project_floating_leg};
use crate::compounding::Compounding;
use crate::config::{CcsBootstrapConfig, CcsQuote};
use crate::curves::{DiscountCurve, ZeroCurve};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;
use crate::valuation::present_value;

/// Non-converged solves above this relative residual are logged as warnings.
const WARN_RELATIVE_RESIDUAL: f64 = 1e-8;

/// Diagnostics for one bootstrapped pillar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarReport {
    /// Quote tenor.
    pub tenor: Tenor,
    /// Swap maturity and pillar date.
    pub end_date: Date,
    /// Solved discount factor.
    pub discount_factor: f64,
    /// Continuously compounded zero rate at the pillar.
    pub zero_rate: f64,
    /// Solver iterations.
    pub iterations: u32,
    /// Final `PV - target` in base currency.
    pub residual: f64,
    /// Whether the solver met its tolerance.
    pub converged: bool,
}

/// Output of [`CcsDiscountBootstrapper::bootstrap_discount_curve`].
#[derive(Debug, Clone)]
pub struct CcsBootstrapResult {
    /// The implied base-currency discount curve.
    pub curve: Arc<DiscountCurve>,
    /// Per-pillar diagnostics in maturity order.
    pub pillars: Vec<PillarReport>,
    /// Swap start date (valuation plus settlement lag).
    pub start_date: Date,
}

impl CcsBootstrapResult {
    /// True when every pillar converged.
    #[must_use]
    pub fn all_converged(&self) -> bool {
        self.pillars.iter().all(|p| p.converged)
    }
}

/// Bootstraps the base-currency (USD) discount curve from cross-currency
/// swap quotes.
///
/// For each quote, in maturity order, the funding (KRW fixed) leg is valued
/// on the funding curve and converted at spot FX. That value is the target
/// for the base (USD floating) leg, whose cash flows come from the
/// projection curve and whose discount factor at maturity is the unknown.
///
/// Both prerequisite curves are supplied either from zero rates
/// ([`build_funding_discount_curve`](Self::build_funding_discount_curve),
/// [`build_projection_curve`](Self::build_projection_curve)) or as any
/// [`Curve`] through the setters.
#[derive(Clone)]
pub struct CcsDiscountBootstrapper {
    config: CcsBootstrapConfig,
    funding_curve: Option<Arc<dyn Curve>>,
    projection_curve: Option<Arc<dyn Curve>>,
}

impl std::fmt::Debug for CcsDiscountBootstrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CcsDiscountBootstrapper")
            .field("config", &self.config)
            .field("has_funding_curve", &self.funding_curve.is_some())
            .field("has_projection_curve", &self.projection_curve.is_some())
            .finish()
    }
}

impl CcsDiscountBootstrapper {
    /// Creates a bootstrapper from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: CcsBootstrapConfig) -> CurveResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            funding_curve: None,
            projection_curve: None,
        })
    }

    /// The bootstrap configuration.
    #[must_use]
    pub fn config(&self) -> &CcsBootstrapConfig {
        &self.config
    }

    /// Builds the funding-currency discount curve from continuously
    /// compounded zero rates, on the funding leg calendar and day count.
    pub fn build_funding_discount_curve(&mut self, rates: &[(Tenor, f64)]) -> CurveResult<Arc<dyn Curve>> {
        let leg = &self.config.funding_leg;
        let curve: Arc<dyn Curve> = Arc::new(ZeroCurve::from_tenor_rates(
            self.config.valuation_date,
            rates,
            &leg.calendar,
            leg.day_count,
        )?);
        self.funding_curve = Some(Arc::clone(&curve));
        Ok(curve)
    }

    /// Builds the base-currency projection curve from continuously
    /// compounded zero rates, on the base leg calendar and day count.
    pub fn build_projection_curve(&mut self, rates: &[(Tenor, f64)]) -> CurveResult<Arc<dyn Curve>> {
        let leg = &self.config.base_leg;
        let curve: Arc<dyn Curve> = Arc::new(ZeroCurve::from_tenor_rates(
            self.config.valuation_date,
            rates,
            &leg.calendar,
            leg.day_count,
        )?);
        self.projection_curve = Some(Arc::clone(&curve));
        Ok(curve)
    }

    /// Sets the funding-currency discount curve.
    pub fn set_funding_curve(&mut self, curve: Arc<dyn Curve>) {
        self.funding_curve = Some(curve);
    }

    /// Sets the base-currency projection curve.
    pub fn set_projection_curve(&mut self, curve: Arc<dyn Curve>) {
        self.projection_curve = Some(curve);
    }

    /// The funding-currency discount curve, if set.
    #[must_use]
    pub fn funding_curve(&self) -> Option<&Arc<dyn Curve>> {
        self.funding_curve.as_ref()
    }

    /// The base-currency projection curve, if set.
    #[must_use]
    pub fn projection_curve(&self) -> Option<&Arc<dyn Curve>> {
        self.projection_curve.as_ref()
    }

    /// Swap start date: valuation plus the settlement lag in base-calendar
    /// business days.
    #[must_use]
    pub fn start_date(&self) -> Date {
        let lag = i32::try_from(self.config.settlement_days).unwrap_or(i32::MAX);
        self.config
            .base_leg
            .calendar
            .add_business_days(self.config.valuation_date, lag)
    }

    /// Bootstraps the base-currency discount curve.
    ///
    /// # Errors
    ///
    /// - `CurveError::MissingCurve` if the funding or projection curve is
    ///   not set
    /// - `CurveError::InvalidConfig` for an empty or invalid quote list
    /// - `CurveError::DuplicateMaturity` if two quotes roll to the same date
    /// - `CurveError::CalibrationFailure` for a non-converged pillar when
    ///   the solver is strict
    pub fn bootstrap_discount_curve(&self, quotes: &[CcsQuote]) -> CurveResult<CcsBootstrapResult> {
        let funding = self
            .funding_curve
            .as_deref()
            .ok_or_else(|| CurveError::missing_curve("funding discount curve"))?;
        let projection = self
            .projection_curve
            .as_deref()
            .ok_or_else(|| CurveError::missing_curve("projection curve"))?;

        if quotes.is_empty() {
            return Err(CurveError::invalid_config("no cross-currency swap quotes"));
        }
        quotes.iter().try_for_each(CcsQuote::validate)?;

        let config = &self.config;
        let funding_leg = &config.funding_leg;
        let base_leg = &config.base_leg;
        let funding_dc = funding_leg.day_count.to_day_count();
        let base_dc = base_leg.day_count.to_day_count();

        let start = self.start_date();
        let instruments = self.order_by_maturity(start, quotes)?;

        info!(
            valuation = %config.valuation_date,
            start = %start,
            spot_fx = config.spot_fx,
            quotes = instruments.len(),
            "Bootstrapping cross-currency discount curve"
        );

        let solver = DfSolver::new(config.valuation_date, base_leg.day_count, config.solver);
        let mut assembler = CurveAssembler::new(config.valuation_date);
        let mut solutions: Vec<(Tenor, Date, DfSolution)> = Vec::with_capacity(instruments.len());

        for (end, quote) in instruments {
            let notional_base = quote.resolve_notional_base(config.spot_fx);

            let funding_schedule = Schedule::generate(
                start,
                end,
                funding_leg.frequency,
                &funding_leg.calendar,
                BusinessDayConvention::ModifiedFollowing,
            )?;
            let funding_flows = project_fixed_leg(
                quote.notional_funding,
                quote.fixed_rate,
                &funding_schedule,
                funding_dc.as_ref(),
            );
            let funding_pv = present_value(&funding_flows, funding)?;
            let target = funding_pv / config.spot_fx;

            let base_schedule = Schedule::generate(
                start,
                end,
                base_leg.frequency,
                &base_leg.calendar,
                BusinessDayConvention::ModifiedFollowing,
            )?;
            let base_flows =
                project_floating_leg(projection, notional_base, &base_schedule, base_dc.as_ref())?;

            let solution = solver.solve(target, &base_flows, assembler.points(), end)?;
            self.check_solution(quote.tenor, target, &solution)?;

            debug!(
                tenor = %quote.tenor,
                end = %end,
                funding_pv,
                target,
                df = solution.discount_factor,
                iterations = solution.iterations,
                "Solved pillar"
            );

            assembler.append(end, solution.discount_factor)?;
            solutions.push((quote.tenor, end, solution));
        }

        let curve = Arc::new(assembler.finalize(base_leg.day_count)?);

        let pillars = solutions
            .into_iter()
            .map(|(tenor, end_date, solution)| {
                Ok(PillarReport {
                    tenor,
                    end_date,
                    discount_factor: solution.discount_factor,
                    zero_rate: curve.zero_rate_at(end_date, Compounding::Continuous)?,
                    iterations: solution.iterations,
                    residual: solution.residual,
                    converged: solution.converged,
                })
            })
            .collect::<CurveResult<Vec<_>>>()?;

        info!(
            pillars = pillars.len(),
            converged = pillars.iter().filter(|p| p.converged).count(),
            "Cross-currency discount curve built"
        );

        Ok(CcsBootstrapResult {
            curve,
            pillars,
            start_date: start,
        })
    }

    /// Resolves each quote's maturity and sorts by it, rejecting collisions.
    fn order_by_maturity<'a>(
        &self,
        start: Date,
        quotes: &'a [CcsQuote],
    ) -> CurveResult<Vec<(Date, &'a CcsQuote)>> {
        let calendar = &self.config.base_leg.calendar;
        let mut instruments = quotes
            .iter()
            .map(|q| Ok((calendar.advance(start, q.tenor, BusinessDayConvention::Following)?, q)))
            .collect::<CurveResult<Vec<_>>>()?;
        instruments.sort_by_key(|(end, _)| *end);

        if let Some(pair) = instruments.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(CurveError::DuplicateMaturity {
                date: pair[0].0,
                first: pair[0].1.tenor.to_string(),
                second: pair[1].1.tenor.to_string(),
            });
        }
        Ok(instruments)
    }

    fn check_solution(&self, tenor: Tenor, target: f64, solution: &DfSolution) -> CurveResult<()> {
        if solution.converged {
            return Ok(());
        }
        if self.config.solver.strict {
            return Err(CurveError::calibration_failed(
                solution.iterations,
                solution.residual,
                format!("{tenor} pillar did not reach tolerance"),
            ));
        }

        let relative = (solution.residual / target.abs().max(f64::MIN_POSITIVE)).abs();
        if relative > WARN_RELATIVE_RESIDUAL {
            warn!(
                tenor = %tenor,
                residual = solution.residual,
                relative,
                df = solution.discount_factor,
                "Pillar solve did not converge, using best-effort discount factor"
            );
        } else {
            debug!(
                tenor = %tenor,
                residual = solution.residual,
                relative,
                "Pillar solve stopped at numerical precision"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn valuation() -> Date {
        Date::from_ymd(2024, 12, 11).unwrap()
    }

    fn bootstrapper() -> CcsDiscountBootstrapper {
        let mut b = CcsDiscountBootstrapper::new(CcsBootstrapConfig::new(valuation(), 1400.0)).unwrap();
        b.build_funding_discount_curve(&[(Tenor::years(1), 0.03), (Tenor::years(10), 0.03)])
            .unwrap();
        b.build_projection_curve(&[(Tenor::years(1), 0.04), (Tenor::years(10), 0.04)])
            .unwrap();
        b
    }

    #[test]
    fn test_missing_curves() {
        let quotes = [CcsQuote::new(Tenor::years(1), 0.02)];
        let mut b = CcsDiscountBootstrapper::new(CcsBootstrapConfig::new(valuation(), 1400.0)).unwrap();
        assert!(matches!(
            b.bootstrap_discount_curve(&quotes),
            Err(CurveError::MissingCurve { .. })
        ));

        b.build_funding_discount_curve(&[(Tenor::years(1), 0.03)]).unwrap();
        let err = b.bootstrap_discount_curve(&quotes).unwrap_err();
        assert_eq!(err, CurveError::missing_curve("projection curve"));
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(CcsDiscountBootstrapper::new(CcsBootstrapConfig::new(valuation(), 0.0)).is_err());
    }

    #[test]
    fn test_start_date_is_two_business_days() {
        // 2024-12-11 is a Wednesday
        assert_eq!(bootstrapper().start_date(), Date::from_ymd(2024, 12, 13).unwrap());
    }

    #[test]
    fn test_orders_quotes_by_maturity() {
        let b = bootstrapper();
        let quotes = [
            CcsQuote::new(Tenor::years(5), 0.02),
            CcsQuote::new(Tenor::months(18), 0.02),
            CcsQuote::new(Tenor::years(1), 0.02),
        ];
        let result = b.bootstrap_discount_curve(&quotes).unwrap();
        let tenors: Vec<String> = result.pillars.iter().map(|p| p.tenor.to_string()).collect();
        assert_eq!(tenors, ["1Y", "18M", "5Y"]);
        assert!(result.pillars.windows(2).all(|w| w[0].end_date < w[1].end_date));
    }

    #[test]
    fn test_duplicate_maturity() {
        let b = bootstrapper();
        let quotes = [
            CcsQuote::new(Tenor::years(1), 0.02),
            CcsQuote::new(Tenor::months(12), 0.021),
        ];
        assert!(matches!(
            b.bootstrap_discount_curve(&quotes),
            Err(CurveError::DuplicateMaturity { .. })
        ));
    }

    #[test]
    fn test_empty_quotes() {
        assert!(matches!(
            bootstrapper().bootstrap_discount_curve(&[]),
            Err(CurveError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_pillar_report_matches_curve() {
        let b = bootstrapper();
        let result = b
            .bootstrap_discount_curve(&[CcsQuote::new(Tenor::years(2), 0.02)])
            .unwrap();
        let pillar = result.pillars[0];
        assert_eq!(result.curve.discount(pillar.end_date).unwrap(), pillar.discount_factor);
        assert_relative_eq!(
            pillar.zero_rate,
            -pillar.discount_factor.ln() / result.curve.year_fraction(pillar.end_date),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_strict_mode_surfaces_non_convergence() {
        let mut config = CcsBootstrapConfig::new(valuation(), 1400.0);
        config.solver.max_iterations = 1;
        config.solver.strict = true;
        let mut b = CcsDiscountBootstrapper::new(config).unwrap();
        b.build_funding_discount_curve(&[(Tenor::years(1), 0.03)]).unwrap();
        b.build_projection_curve(&[(Tenor::years(1), 0.04)]).unwrap();

        let err = b
            .bootstrap_discount_curve(&[CcsQuote::new(Tenor::years(5), 0.02)])
            .unwrap_err();
        assert!(matches!(err, CurveError::CalibrationFailure { .. }));
    }
}
