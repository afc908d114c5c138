//! Actual/360.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/360 day count convention.
///
/// Actual days over a 360-day year. Used for SOFR-linked floating legs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quarter() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 4, 1).unwrap();
        assert_eq!(Act360.day_count(start, end), 90);
        assert_eq!(Act360.year_fraction(start, end), dec!(0.25));
    }

    #[test]
    fn test_full_year_exceeds_one() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 1, 1).unwrap();
        assert_eq!(Act360.year_fraction(start, end), dec!(365) / dec!(360));
    }

    #[test]
    fn test_negative_when_reversed() {
        let start = Date::from_ymd(2025, 4, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        assert!(Act360.year_fraction(start, end) < Decimal::ZERO);
    }
}
