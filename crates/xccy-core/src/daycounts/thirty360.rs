//! 30/360 US (Bond Basis).

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

/// 30/360 US day count convention.
///
/// Rules, applied in order:
/// 1. If D1 is the last day of February, D1 = 30
/// 2. If D1 was Feb EOM and D2 is the last day of February, D2 = 30
/// 3. If D1 = 31, D1 = 30
/// 4. If D2 = 31 and D1 >= 30, D2 = 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let y1 = i64::from(start.year());
        let y2 = i64::from(end.year());
        let m1 = i64::from(start.month());
        let m2 = i64::from(end.month());
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        let start_feb_eom = is_last_day_of_february(start);
        if start_feb_eom {
            d1 = 30;
            if is_last_day_of_february(end) {
                d2 = 30;
            }
        } else if d1 == 31 {
            d1 = 30;
        }

        if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }

        360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_half_year() {
        let start = Date::from_ymd(2025, 1, 15).unwrap();
        let end = Date::from_ymd(2025, 7, 15).unwrap();
        assert_eq!(Thirty360US.day_count(start, end), 180);
        assert_eq!(Thirty360US.year_fraction(start, end), dec!(0.5));
    }

    #[test]
    fn test_month_end_31st() {
        let start = Date::from_ymd(2025, 1, 31).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();
        assert_eq!(Thirty360US.day_count(start, end), 60);
    }

    #[test]
    fn test_february_end_of_month() {
        let start = Date::from_ymd(2025, 2, 28).unwrap();
        let end = Date::from_ymd(2025, 8, 31).unwrap();
        assert_eq!(Thirty360US.day_count(start, end), 180);

        let start = Date::from_ymd(2024, 2, 29).unwrap();
        let end = Date::from_ymd(2025, 2, 28).unwrap();
        assert_eq!(Thirty360US.day_count(start, end), 360);
    }
}
