//! Present value of known cash flows.

use crate::cashflows::CashflowPoint;
use crate::error::CurveResult;
use crate::traits::Curve;

/// `Σ amount * curve.discount(payment_date)`.
pub fn present_value(cashflows: &[CashflowPoint], curve: &dyn Curve) -> CurveResult<f64> {
    cashflows.iter().try_fold(0.0, |pv, cf| {
        Ok(pv + cf.amount * curve.discount(cf.payment_date)?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::DiscountCurve;
    use approx::assert_relative_eq;
    use xccy_core::daycounts::DayCountConvention;
    use xccy_core::Date;

    #[test]
    fn test_present_value() {
        let d0 = Date::from_ymd(2025, 1, 2).unwrap();
        let d1 = d0.add_days(365);
        let curve =
            DiscountCurve::new(vec![d0, d1], vec![1.0, 0.96], DayCountConvention::Act365Fixed)
                .unwrap();

        let flows = [CashflowPoint::new(d0, 10.0), CashflowPoint::new(d1, 100.0)];
        assert_relative_eq!(present_value(&flows, &curve).unwrap(), 106.0, epsilon = 1e-12);
        assert_eq!(present_value(&[], &curve).unwrap(), 0.0);
    }
}
