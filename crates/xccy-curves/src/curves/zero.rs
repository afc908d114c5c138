//! Zero-rate curve.

use xccy_core::calendars::{BusinessDayConvention, Calendar};
use xccy_core::daycounts::DayCountConvention;
use xccy_core::{Date, Tenor};
use xccy_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};

use super::pillar_times;
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Curve of continuously compounded zero rates at pillar dates.
///
/// Rates are interpolated linearly in time and extrapolated linearly from
/// the outermost segments. The first pillar is the reference date.
///
/// ```rust
/// use xccy_core::prelude::*;
/// use xccy_curves::{Compounding, Curve, ZeroCurve};
///
/// let valuation = Date::from_ymd(2024, 12, 11).unwrap();
/// let curve = ZeroCurve::from_tenor_rates(
///     valuation,
///     &[(Tenor::years(1), 0.03), (Tenor::years(5), 0.03)],
///     &WeekendCalendar,
///     DayCountConvention::Act365Fixed,
/// )
/// .unwrap();
///
/// let rate = curve.zero_rate(3.0, Compounding::Continuous).unwrap();
/// assert!((rate - 0.03).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ZeroCurve {
    dates: Vec<Date>,
    rates: Vec<f64>,
    interpolator: LinearInterpolator,
    day_count: DayCountConvention,
}

impl ZeroCurve {
    /// Creates a zero curve from dated rates. `dates[0]` is the reference
    /// date.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than two points, mismatched lengths,
    /// non-increasing dates or non-finite rates.
    pub fn new(dates: Vec<Date>, rates: Vec<f64>, day_count: DayCountConvention) -> CurveResult<Self> {
        if dates.len() != rates.len() {
            return Err(CurveError::invalid_value(format!(
                "{} dates but {} rates",
                dates.len(),
                rates.len()
            )));
        }
        if let Some(r) = rates.iter().find(|r| !r.is_finite()) {
            return Err(CurveError::invalid_value(format!("zero rate {r} is not finite")));
        }

        let times = pillar_times(&dates, day_count)?;
        let interpolator = LinearInterpolator::new(times, rates.clone())?
            .with_extrapolation(Extrapolation::Linear);

        Ok(Self {
            dates,
            rates,
            interpolator,
            day_count,
        })
    }

    /// Builds a curve from `(tenor, rate)` quotes.
    ///
    /// Each pillar sits at `calendar.advance(valuation, tenor)` rolled
    /// Following. The valuation date is prepended carrying the first rate.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidConfig` for an empty quote list and
    /// `CurveError::NonMonotonicDates` when tenors are not in maturity
    /// order.
    pub fn from_tenor_rates<C: Calendar + ?Sized>(
        valuation: Date,
        rates: &[(Tenor, f64)],
        calendar: &C,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        let Some(&(_, first_rate)) = rates.first() else {
            return Err(CurveError::invalid_config("zero curve needs at least one rate"));
        };

        let mut dates = vec![valuation];
        let mut values = vec![first_rate];
        for &(tenor, rate) in rates {
            let date = calendar.advance(valuation, tenor, BusinessDayConvention::Following)?;
            if date == valuation {
                values[0] = rate;
                continue;
            }
            dates.push(date);
            values.push(rate);
        }

        Self::new(dates, values, day_count)
    }

    /// Pillar dates, reference date first.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Zero rates at the pillar dates.
    #[must_use]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    fn rate_at(&self, t: f64) -> CurveResult<f64> {
        Ok(self.interpolator.interpolate(t)?)
    }
}

impl Curve for ZeroCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok((-self.rate_at(t)? * t).exp())
    }

    fn reference_date(&self) -> Date {
        self.dates[0]
    }

    fn max_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}
