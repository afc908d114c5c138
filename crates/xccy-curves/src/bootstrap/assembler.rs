//! Append-only accumulator of solved discount factors.

use serde::{Deserialize, Serialize};
use xccy_core::daycounts::DayCountConvention;
use xccy_core::Date;

use crate::curves::DiscountCurve;
use crate::error::{CurveError, CurveResult};

/// A solved `(date, discount_factor)` pillar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Pillar date.
    pub date: Date,
    /// Discount factor from the valuation date.
    pub discount_factor: f64,
}

impl CurvePoint {
    /// Creates a curve point.
    #[must_use]
    pub fn new(date: Date, discount_factor: f64) -> Self {
        Self {
            date,
            discount_factor,
        }
    }
}

/// Accumulates bootstrapped pillars and finalizes them into a
/// [`DiscountCurve`].
///
/// Starts anchored at `(valuation_date, 1.0)`. Dates must strictly increase.
///
/// ```rust
/// use xccy_core::prelude::*;
/// use xccy_curves::{Curve, CurveAssembler};
///
/// let valuation = Date::from_ymd(2024, 12, 11).unwrap();
/// let mut assembler = CurveAssembler::new(valuation);
/// assembler.append(valuation.add_days(365), 0.97).unwrap();
/// assert!(assembler.append(valuation.add_days(100), 0.99).is_err());
///
/// let curve = assembler.finalize(DayCountConvention::Act365Fixed).unwrap();
/// assert_eq!(curve.discount(valuation.add_days(365)).unwrap(), 0.97);
/// ```
#[derive(Debug, Clone)]
pub struct CurveAssembler {
    points: Vec<CurvePoint>,
}

impl CurveAssembler {
    /// Creates an assembler anchored at the valuation date.
    #[must_use]
    pub fn new(valuation_date: Date) -> Self {
        Self {
            points: vec![CurvePoint::new(valuation_date, 1.0)],
        }
    }

    /// Appends a solved pillar.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NonMonotonicDates` if `date` is not after the last
    /// pillar and `CurveError::InvalidValue` for a non-positive or non-finite
    /// discount factor.
    pub fn append(&mut self, date: Date, discount_factor: f64) -> CurveResult<()> {
        let previous = self.last().date;
        if date <= previous {
            return Err(CurveError::NonMonotonicDates { previous, date });
        }
        if !(discount_factor.is_finite() && discount_factor > 0.0) {
            return Err(CurveError::invalid_value(format!(
                "discount factor {discount_factor} at {date} must be positive and finite"
            )));
        }
        self.points.push(CurvePoint::new(date, discount_factor));
        Ok(())
    }

    /// Pillars so far, anchor first.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// The most recent pillar (the anchor if nothing was appended).
    #[must_use]
    pub fn last(&self) -> CurvePoint {
        self.points[self.points.len() - 1]
    }

    /// Number of pillars including the anchor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when only the anchor is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.len() <= 1
    }

    /// Builds the log-linear discount curve on the given time axis.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InsufficientPoints` if no pillar was appended.
    pub fn finalize(self, day_count: DayCountConvention) -> CurveResult<DiscountCurve> {
        let (dates, dfs): (Vec<Date>, Vec<f64>) = self
            .points
            .into_iter()
            .map(|p| (p.date, p.discount_factor))
            .unzip();
        DiscountCurve::new(dates, dfs, day_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Curve;

    fn valuation() -> Date {
        Date::from_ymd(2024, 12, 11).unwrap()
    }

    #[test]
    fn test_anchor() {
        let assembler = CurveAssembler::new(valuation());
        assert_eq!(assembler.points(), &[CurvePoint::new(valuation(), 1.0)]);
        assert!(assembler.is_empty());
        assert_eq!(assembler.len(), 1);
    }

    #[test]
    fn test_append_enforces_order_and_positivity() {
        let mut assembler = CurveAssembler::new(valuation());
        let d1 = valuation().add_days(365);
        assembler.append(d1, 0.97).unwrap();

        assert!(matches!(
            assembler.append(d1, 0.95),
            Err(CurveError::NonMonotonicDates { .. })
        ));
        assert!(assembler.append(d1.add_days(1), 0.0).is_err());
        assert!(assembler.append(d1.add_days(1), f64::NAN).is_err());
        assert_eq!(assembler.len(), 2);
    }

    #[test]
    fn test_finalize_reproduces_points() {
        let mut assembler = CurveAssembler::new(valuation());
        let pillars = [(365, 0.97), (730, 0.94), (1825, 0.85)];
        for (days, df) in pillars {
            assembler.append(valuation().add_days(days), df).unwrap();
        }
        let curve = assembler.finalize(DayCountConvention::Act360).unwrap();
        for (days, df) in pillars {
            assert_eq!(curve.discount(valuation().add_days(days)).unwrap(), df);
        }
    }

    #[test]
    fn test_finalize_needs_a_pillar() {
        let assembler = CurveAssembler::new(valuation());
        assert!(matches!(
            assembler.finalize(DayCountConvention::Act360),
            Err(CurveError::InsufficientPoints { .. })
        ));
    }
}
