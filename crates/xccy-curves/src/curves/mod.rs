//! Concrete term structures.
//!
//! - [`ZeroCurve`]: continuously compounded zero rates, linear in rate
//! - [`DiscountCurve`]: discount factors, log-linear, flat-zero extrapolation
//! - [`SpreadedCurve`]: a base curve shifted by a zero-rate spread

mod discount;
mod spread;
mod zero;

pub use discount::DiscountCurve;
pub use spread::SpreadedCurve;
pub use zero::ZeroCurve;

use xccy_core::daycounts::DayCountConvention;
use xccy_core::Date;

use crate::error::{CurveError, CurveResult};

/// Converts pillar dates to year fractions from the first date, checking
/// that the dates strictly increase.
pub(crate) fn pillar_times(dates: &[Date], day_count: DayCountConvention) -> CurveResult<Vec<f64>> {
    if dates.len() < 2 {
        return Err(CurveError::InsufficientPoints {
            required: 2,
            got: dates.len(),
        });
    }
    if let Some(w) = dates.windows(2).find(|w| w[1] <= w[0]) {
        return Err(CurveError::NonMonotonicDates {
            previous: w[0],
            date: w[1],
        });
    }
    Ok(dates
        .iter()
        .map(|&d| day_count.year_fraction(dates[0], d))
        .collect())
}
