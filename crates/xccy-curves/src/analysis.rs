//! Tenor-keyed curve reports and curve-to-curve comparison.

use serde::Serialize;
use xccy_core::calendars::{BusinessDayConvention, Calendar};
use xccy_core::daycounts::DayCount;
use xccy_core::{Date, Tenor};

use crate::compounding::Compounding;
use crate::error::CurveResult;
use crate::traits::Curve;

/// A curve value at a tenor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TenorPoint {
    /// Tenor from the curve reference date.
    pub tenor: Tenor,
    /// Rolled pillar date.
    pub date: Date,
    /// Zero rate, discount factor or forward rate, depending on the report.
    pub value: f64,
}

/// One row of [`compare_curves`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveComparison {
    /// Tenor from the reference date of curve `a`.
    pub tenor: Tenor,
    /// Rolled date.
    pub date: Date,
    /// Continuous zero rate on curve `a`.
    pub zero_a: f64,
    /// Continuous zero rate on curve `b`.
    pub zero_b: f64,
    /// `(zero_b - zero_a) * 1e4`.
    pub diff_bps: f64,
    /// Discount factor on curve `a`.
    pub df_a: f64,
    /// Discount factor on curve `b`.
    pub df_b: f64,
    /// `df_b / df_a`.
    pub df_ratio: f64,
}

/// Projection against discount rates at a tenor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasisPoint {
    /// Tenor.
    pub tenor: Tenor,
    /// Projection (forwarding) curve zero rate.
    pub projection_zero: f64,
    /// Discount curve zero rate.
    pub discount_zero: f64,
    /// `(discount_zero - projection_zero) * 1e4`.
    pub basis_bps: f64,
}

fn tenor_date<C: Calendar + ?Sized>(curve: &dyn Curve, tenor: Tenor, calendar: &C) -> CurveResult<Date> {
    Ok(calendar.advance(curve.reference_date(), tenor, BusinessDayConvention::Following)?)
}

/// Continuously compounded zero rates at each tenor.
pub fn zero_rates<C: Calendar + ?Sized>(
    curve: &dyn Curve,
    tenors: &[Tenor],
    calendar: &C,
) -> CurveResult<Vec<TenorPoint>> {
    tenors
        .iter()
        .map(|&tenor| {
            let date = tenor_date(curve, tenor, calendar)?;
            Ok(TenorPoint {
                tenor,
                date,
                value: curve.zero_rate_at(date, Compounding::Continuous)?,
            })
        })
        .collect()
}

/// Discount factors at each tenor.
pub fn discount_factors<C: Calendar + ?Sized>(
    curve: &dyn Curve,
    tenors: &[Tenor],
    calendar: &C,
) -> CurveResult<Vec<TenorPoint>> {
    tenors
        .iter()
        .map(|&tenor| {
            let date = tenor_date(curve, tenor, calendar)?;
            Ok(TenorPoint {
                tenor,
                date,
                value: curve.discount(date)?,
            })
        })
        .collect()
}

/// Simple forward rates over `forward_tenor`, starting at each tenor.
pub fn forward_rates<C: Calendar + ?Sized>(
    curve: &dyn Curve,
    tenors: &[Tenor],
    forward_tenor: Tenor,
    calendar: &C,
    day_count: &dyn DayCount,
) -> CurveResult<Vec<TenorPoint>> {
    tenors
        .iter()
        .map(|&tenor| {
            let start = tenor_date(curve, tenor, calendar)?;
            let end = calendar.advance(start, forward_tenor, BusinessDayConvention::Following)?;
            Ok(TenorPoint {
                tenor,
                date: start,
                value: curve.forward_rate_between(start, end, day_count)?,
            })
        })
        .collect()
}

/// Compares two curves tenor by tenor.
pub fn compare_curves<C: Calendar + ?Sized>(
    a: &dyn Curve,
    b: &dyn Curve,
    tenors: &[Tenor],
    calendar: &C,
) -> CurveResult<Vec<CurveComparison>> {
    tenors
        .iter()
        .map(|&tenor| {
            let date = tenor_date(a, tenor, calendar)?;
            let zero_a = a.zero_rate_at(date, Compounding::Continuous)?;
            let zero_b = b.zero_rate_at(date, Compounding::Continuous)?;
            let df_a = a.discount(date)?;
            let df_b = b.discount(date)?;
            Ok(CurveComparison {
                tenor,
                date,
                zero_a,
                zero_b,
                diff_bps: (zero_b - zero_a) * 1e4,
                df_a,
                df_b,
                df_ratio: df_b / df_a,
            })
        })
        .collect()
}

/// Cross-currency basis implied between a projection and a discount curve.
pub fn ccs_basis<C: Calendar + ?Sized>(
    projection: &dyn Curve,
    discount: &dyn Curve,
    tenors: &[Tenor],
    calendar: &C,
) -> CurveResult<Vec<BasisPoint>> {
    Ok(compare_curves(projection, discount, tenors, calendar)?
        .into_iter()
        .map(|row| BasisPoint {
            tenor: row.tenor,
            projection_zero: row.zero_a,
            discount_zero: row.zero_b,
            basis_bps: row.diff_bps,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::ZeroCurve;
    use approx::assert_relative_eq;
    use xccy_core::calendars::WeekendCalendar;
    use xccy_core::daycounts::DayCountConvention;

    fn flat(rate: f64) -> ZeroCurve {
        ZeroCurve::from_tenor_rates(
            Date::from_ymd(2024, 12, 11).unwrap(),
            &[(Tenor::years(1), rate), (Tenor::years(10), rate)],
            &WeekendCalendar,
            DayCountConvention::Act365Fixed,
        )
        .unwrap()
    }

    #[test]
    fn test_zero_rates_on_flat_curve() {
        let tenors = [Tenor::years(2), Tenor::years(5)];
        let rows = zero_rates(&flat(0.03), &tenors, &WeekendCalendar).unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_relative_eq!(row.value, 0.03, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_discount_factors_decrease() {
        let tenors = [Tenor::years(1), Tenor::years(2), Tenor::years(5)];
        let rows = discount_factors(&flat(0.03), &tenors, &WeekendCalendar).unwrap();
        assert!(rows.windows(2).all(|w| w[1].value < w[0].value));
    }

    #[test]
    fn test_forward_rates_on_flat_curve() {
        let dc = DayCountConvention::Act365Fixed.to_day_count();
        let rows = forward_rates(
            &flat(0.03),
            &[Tenor::years(1), Tenor::years(4)],
            Tenor::months(3),
            &WeekendCalendar,
            dc.as_ref(),
        )
        .unwrap();
        for row in rows {
            // Simple rate over a quarter from a 3% continuous curve
            assert!(row.value > 0.03 && row.value < 0.0302);
        }
    }

    #[test]
    fn test_compare_and_basis() {
        let low = flat(0.03);
        let high = flat(0.035);
        let tenors = [Tenor::years(5)];

        let rows = compare_curves(&low, &high, &tenors, &WeekendCalendar).unwrap();
        assert_relative_eq!(rows[0].diff_bps, 50.0, epsilon = 1e-8);
        assert!(rows[0].df_ratio < 1.0);

        let basis = ccs_basis(&high, &low, &tenors, &WeekendCalendar).unwrap();
        assert_relative_eq!(basis[0].basis_bps, -50.0, epsilon = 1e-8);
    }
}
