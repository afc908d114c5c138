//! Zero-spreaded curves for funding adjustments.

use std::sync::Arc;

use xccy_core::calendars::{BusinessDayConvention, Calendar};
use xccy_core::daycounts::DayCountConvention;
use xccy_core::{Date, Tenor};
use xccy_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

const BPS: f64 = 1e-4;

#[derive(Debug, Clone)]
enum SpreadShape {
    Flat(f64),
    Term {
        interpolator: LinearInterpolator,
        last_date: Date,
    },
}

/// A base curve with a continuously compounded zero spread added.
///
/// `df(t) = df_base(t) * exp(-s(t) * t)`, so the zero rate is the base zero
/// rate plus `s(t)`.
///
/// ```rust
/// use std::sync::Arc;
/// use xccy_core::prelude::*;
/// use xccy_curves::{Compounding, Curve, SpreadedCurve, ZeroCurve};
///
/// let valuation = Date::from_ymd(2024, 12, 11).unwrap();
/// let ois = ZeroCurve::from_tenor_rates(
///     valuation,
///     &[(Tenor::years(1), 0.04), (Tenor::years(10), 0.04)],
///     &WeekendCalendar,
///     DayCountConvention::Act365Fixed,
/// )
/// .unwrap();
///
/// let funding = SpreadedCurve::flat(Arc::new(ois), 25.0);
/// let z = funding.zero_rate(5.0, Compounding::Continuous).unwrap();
/// assert!((z - 0.0425).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct SpreadedCurve {
    base: Arc<dyn Curve>,
    shape: SpreadShape,
}

impl std::fmt::Debug for SpreadedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadedCurve")
            .field("reference_date", &self.base.reference_date())
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

impl SpreadedCurve {
    /// Base curve plus a constant spread in basis points.
    #[must_use]
    pub fn flat(base: Arc<dyn Curve>, spread_bps: f64) -> Self {
        Self {
            base,
            shape: SpreadShape::Flat(spread_bps * BPS),
        }
    }

    /// Base curve plus a term structure of spreads in basis points.
    ///
    /// The spread is 0 at the reference date, interpolated linearly in time
    /// through the `(tenor, bps)` points and held flat after the last one.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidConfig` for an empty or non-finite spread
    /// list and `CurveError::NonMonotonicDates` if the tenors are out of
    /// order.
    pub fn term<C: Calendar + ?Sized>(
        base: Arc<dyn Curve>,
        spreads_bps: &[(Tenor, f64)],
        calendar: &C,
    ) -> CurveResult<Self> {
        if spreads_bps.is_empty() {
            return Err(CurveError::invalid_config("term spread needs at least one point"));
        }

        let reference = base.reference_date();
        let mut previous = reference;
        let mut times = vec![0.0];
        let mut spreads = vec![0.0];

        for &(tenor, bps) in spreads_bps {
            if !bps.is_finite() {
                return Err(CurveError::invalid_config(format!(
                    "spread for {tenor} is not finite"
                )));
            }
            let date = calendar.advance(reference, tenor, BusinessDayConvention::Following)?;
            if date <= previous {
                return Err(CurveError::NonMonotonicDates { previous, date });
            }
            times.push(base.year_fraction(date));
            spreads.push(bps * BPS);
            previous = date;
        }

        let interpolator =
            LinearInterpolator::new(times, spreads)?.with_extrapolation(Extrapolation::Flat);

        Ok(Self {
            base,
            shape: SpreadShape::Term {
                interpolator,
                last_date: previous,
            },
        })
    }

    /// Spread (as a decimal rate) applied at time `t`.
    pub fn spread_at(&self, t: f64) -> CurveResult<f64> {
        match &self.shape {
            SpreadShape::Flat(s) => Ok(*s),
            SpreadShape::Term { interpolator, .. } => Ok(interpolator.interpolate(t)?),
        }
    }

    /// The underlying curve.
    #[must_use]
    pub fn base(&self) -> &Arc<dyn Curve> {
        &self.base
    }
}

impl Curve for SpreadedCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        let base_df = self.base.discount_factor(t)?;
        if t <= 0.0 {
            return Ok(base_df);
        }
        Ok(base_df * (-self.spread_at(t)? * t).exp())
    }

    fn reference_date(&self) -> Date {
        self.base.reference_date()
    }

    fn max_date(&self) -> Date {
        match &self.shape {
            SpreadShape::Flat(_) => self.base.max_date(),
            SpreadShape::Term { last_date, .. } => self.base.max_date().max(*last_date),
        }
    }

    fn day_count(&self) -> DayCountConvention {
        self.base.day_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compounding::Compounding;
    use crate::curves::ZeroCurve;
    use approx::assert_relative_eq;
    use xccy_core::calendars::WeekendCalendar;

    fn ois() -> Arc<dyn Curve> {
        Arc::new(
            ZeroCurve::from_tenor_rates(
                Date::from_ymd(2024, 12, 11).unwrap(),
                &[(Tenor::years(1), 0.04), (Tenor::years(10), 0.04)],
                &WeekendCalendar,
                DayCountConvention::Act365Fixed,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_flat_spread_shifts_zero_rates() {
        let funding = SpreadedCurve::flat(ois(), 50.0);
        for t in [0.5, 1.0, 7.0, 15.0] {
            assert_relative_eq!(
                funding.zero_rate(t, Compounding::Continuous).unwrap(),
                0.045,
                epsilon = 1e-12
            );
        }
        assert!(funding.discount_factor(5.0).unwrap() < ois().discount_factor(5.0).unwrap());
    }

    #[test]
    fn test_term_spread_interpolation() {
        let base = ois();
        let cal = WeekendCalendar;
        let funding =
            SpreadedCurve::term(base.clone(), &[(Tenor::years(1), 20.0), (Tenor::years(5), 60.0)], &cal)
                .unwrap();

        let one_year = cal
            .advance(base.reference_date(), Tenor::years(1), BusinessDayConvention::Following)
            .unwrap();
        let t1 = base.year_fraction(one_year);

        assert_relative_eq!(funding.spread_at(0.0).unwrap(), 0.0);
        assert_relative_eq!(funding.spread_at(t1 / 2.0).unwrap(), 0.001, epsilon = 1e-14);
        assert_relative_eq!(funding.spread_at(t1).unwrap(), 0.002, epsilon = 1e-14);
        assert_relative_eq!(funding.spread_at(30.0).unwrap(), 0.006, epsilon = 1e-14);
        assert_relative_eq!(
            funding.zero_rate(30.0, Compounding::Continuous).unwrap(),
            0.046,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_term_spread_rejects_bad_input() {
        let cal = WeekendCalendar;
        assert!(SpreadedCurve::term(ois(), &[], &cal).is_err());
        assert!(matches!(
            SpreadedCurve::term(ois(), &[(Tenor::years(5), 10.0), (Tenor::years(1), 5.0)], &cal),
            Err(CurveError::NonMonotonicDates { .. })
        ));
    }
}
