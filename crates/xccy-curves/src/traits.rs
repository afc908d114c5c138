//! The [`Curve`] trait shared by every term structure.

use xccy_core::daycounts::{DayCount, DayCountConvention};
use xccy_core::Date;

use crate::compounding::Compounding;
use crate::error::{CurveError, CurveResult};

/// Time used for zero rates at the reference date itself.
const SHORT_END_TIME: f64 = 1e-4;

/// An immutable, queryable term structure.
///
/// Implementors supply discount factors on the curve's own time axis (year
/// fractions from [`reference_date`](Curve::reference_date) under
/// [`day_count`](Curve::day_count)). Zero and forward rates derive from them.
/// Extrapolation is always enabled.
pub trait Curve: Send + Sync {
    /// Discount factor at time `t` in years from the reference date.
    fn discount_factor(&self, t: f64) -> CurveResult<f64>;

    /// The curve's valuation date.
    fn reference_date(&self) -> Date;

    /// The last date with market data. The curve extrapolates beyond it.
    fn max_date(&self) -> Date;

    /// Day count of the curve's time axis.
    fn day_count(&self) -> DayCountConvention;

    /// Year fraction from the reference date to `date`.
    fn year_fraction(&self, date: Date) -> f64 {
        self.day_count().year_fraction(self.reference_date(), date)
    }

    /// Zero rate at time `t` with the given compounding.
    ///
    /// At `t <= 0` the short-end limit is returned.
    fn zero_rate(&self, t: f64, compounding: Compounding) -> CurveResult<f64> {
        let t = if t <= 0.0 { SHORT_END_TIME } else { t };
        let df = self.discount_factor(t)?;
        Ok(compounding.zero_rate(df, t))
    }

    /// Simply compounded forward rate between `t1` and `t2`.
    ///
    /// `F(t1, t2) = (DF(t1) / DF(t2) - 1) / (t2 - t1)`
    fn forward_rate(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if t2 <= t1 {
            return Err(CurveError::invalid_value(format!(
                "forward period end {t2:.6} must be after start {t1:.6}"
            )));
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok((df1 / df2 - 1.0) / (t2 - t1))
    }

    /// Discount factor for a date.
    fn discount(&self, date: Date) -> CurveResult<f64> {
        self.discount_factor(self.year_fraction(date))
    }

    /// Zero rate to a date.
    fn zero_rate_at(&self, date: Date, compounding: Compounding) -> CurveResult<f64> {
        self.zero_rate(self.year_fraction(date), compounding)
    }

    /// Simply compounded forward rate between two dates, accrued under
    /// `day_count`.
    fn forward_rate_between(
        &self,
        start: Date,
        end: Date,
        day_count: &dyn DayCount,
    ) -> CurveResult<f64> {
        let tau = day_count.year_fraction_f64(start, end);
        if end <= start || tau <= 0.0 {
            return Err(CurveError::invalid_value(format!(
                "forward period {start} to {end} is empty"
            )));
        }
        let df1 = self.discount(start)?;
        let df2 = self.discount(end)?;
        Ok((df1 / df2 - 1.0) / tau)
    }
}
