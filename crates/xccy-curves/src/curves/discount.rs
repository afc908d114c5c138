//! Discount factor curve.

use xccy_core::daycounts::DayCountConvention;
use xccy_core::Date;
use xccy_math::interpolation::{Interpolator, LogLinearInterpolator};

use super::pillar_times;
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Curve of discount factors at pillar dates.
///
/// Log-linear between pillars, so every pillar is reproduced exactly.
/// Before the first pillar the first discount factor applies. Beyond the
/// last pillar the continuously compounded zero rate of the last pillar is
/// held flat.
#[derive(Debug, Clone)]
pub struct DiscountCurve {
    dates: Vec<Date>,
    times: Vec<f64>,
    discount_factors: Vec<f64>,
    interpolator: LogLinearInterpolator,
    day_count: DayCountConvention,
}

impl DiscountCurve {
    /// Creates a discount curve. `dates[0]` is the reference date.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than two points, mismatched lengths,
    /// non-increasing dates or non-positive discount factors.
    pub fn new(
        dates: Vec<Date>,
        discount_factors: Vec<f64>,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        if dates.len() != discount_factors.len() {
            return Err(CurveError::invalid_value(format!(
                "{} dates but {} discount factors",
                dates.len(),
                discount_factors.len()
            )));
        }
        if let Some(df) = discount_factors.iter().find(|df| !df.is_finite() || **df <= 0.0) {
            return Err(CurveError::invalid_value(format!(
                "discount factor {df} must be positive and finite"
            )));
        }

        let times = pillar_times(&dates, day_count)?;
        let interpolator = LogLinearInterpolator::new(times.clone(), discount_factors.clone())?;

        Ok(Self {
            dates,
            times,
            discount_factors,
            interpolator,
            day_count,
        })
    }

    /// Pillar dates, reference date first.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Discount factors at the pillar dates.
    #[must_use]
    pub fn discount_factors(&self) -> &[f64] {
        &self.discount_factors
    }

    /// Iterates over `(date, discount_factor)` pillars.
    pub fn points(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.discount_factors.iter().copied())
    }
}

impl Curve for DiscountCurve {
    fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        let n = self.times.len();
        let (t_first, t_last) = (self.times[0], self.times[n - 1]);

        if t <= t_first {
            return Ok(self.discount_factors[0]);
        }
        if t > t_last {
            let df_last = self.discount_factors[n - 1];
            return Ok((df_last.ln() * t / t_last).exp());
        }
        Ok(self.interpolator.interpolate(t)?)
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
