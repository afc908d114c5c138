//! Business day calendars and conventions.
//!
//! Only weekend handling is built in. Market holidays are supplied by the
//! caller as an explicit date list through [`HolidayCalendar`].

mod conventions;

pub use conventions::BusinessDayConvention;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Tenor, TenorUnit};

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday or weekend.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Moves a date by a number of business days. Negative counts move back.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Advances a date by a tenor.
    ///
    /// Day tenors count business days. Week, month and year tenors add the
    /// calendar period and then adjust the result with `convention`.
    fn advance(
        &self,
        date: Date,
        tenor: Tenor,
        convention: BusinessDayConvention,
    ) -> CoreResult<Date> {
        let length = i32::try_from(tenor.length())
            .map_err(|_| CoreError::calendar_error(format!("tenor {tenor} is too long")))?;

        let unadjusted = match tenor.unit() {
            TenorUnit::Days => {
                if length == 0 {
                    date
                } else {
                    return Ok(self.add_business_days(date, length));
                }
            }
            TenorUnit::Weeks => date.add_days(7 * i64::from(length)),
            TenorUnit::Months => date.add_months(length)?,
            TenorUnit::Years => date.add_years(length)?,
        };

        Ok(self.adjust(unadjusted, convention))
    }
}

/// A weekend-only calendar with no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Weekends plus an explicit list of holiday dates.
///
/// ```rust
/// use xccy_core::calendars::{Calendar, HolidayCalendar};
/// use xccy_core::types::Date;
///
/// let new_year = Date::from_ymd(2025, 1, 1).unwrap();
/// let cal = HolidayCalendar::new("KRW", [new_year]);
/// assert!(!cal.is_business_day(new_year));
/// assert_eq!(cal.add_business_days(Date::from_ymd(2024, 12, 31).unwrap(), 1),
///            Date::from_ymd(2025, 1, 2).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    name: String,
    #[serde(default)]
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a name and a set of holiday dates.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Creates a calendar that only observes weekends.
    pub fn weekends_only(name: impl Into<String>) -> Self {
        Self::new(name, std::iter::empty())
    }

    /// Adds a holiday.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Returns the holiday dates in ascending order.
    pub fn holidays(&self) -> impl Iterator<Item = &Date> {
        self.holidays.iter()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(d(2024, 12, 13))); // Friday
        assert!(!cal.is_business_day(d(2024, 12, 14)));
        assert!(!cal.is_business_day(d(2024, 12, 15)));
    }

    #[test]
    fn test_add_business_days_skips_weekend() {
        let cal = WeekendCalendar;
        // Thursday + 2 business days = Monday
        assert_eq!(cal.add_business_days(d(2024, 12, 12), 2), d(2024, 12, 16));
        assert_eq!(cal.add_business_days(d(2024, 12, 16), -1), d(2024, 12, 13));
        assert_eq!(cal.add_business_days(d(2024, 12, 16), 0), d(2024, 12, 16));
    }

    #[test]
    fn test_advance_months_and_years() {
        let cal = WeekendCalendar;
        let spot = d(2024, 12, 13);
        // 2025-03-13 is a Thursday
        assert_eq!(
            cal.advance(spot, Tenor::months(3), BusinessDayConvention::Following)
                .unwrap(),
            d(2025, 3, 13)
        );
        // 2025-12-13 is a Saturday
        assert_eq!(
            cal.advance(spot, Tenor::years(1), BusinessDayConvention::Following)
                .unwrap(),
            d(2025, 12, 15)
        );
    }

    #[test]
    fn test_advance_days_counts_business_days() {
        let cal = WeekendCalendar;
        let friday = d(2024, 12, 13);
        assert_eq!(
            cal.advance(friday, "ON".parse().unwrap(), BusinessDayConvention::Following)
                .unwrap(),
            d(2024, 12, 16)
        );
    }

    #[test]
    fn test_advance_weeks() {
        let cal = WeekendCalendar;
        assert_eq!(
            cal.advance(
                d(2024, 12, 13),
                Tenor::new(2, TenorUnit::Weeks),
                BusinessDayConvention::Following
            )
            .unwrap(),
            d(2024, 12, 27)
        );
    }

    #[test]
    fn test_holiday_calendar() {
        let mut cal = HolidayCalendar::weekends_only("KRW");
        assert!(cal.is_business_day(d(2025, 1, 1)));
        cal.add_holiday(d(2025, 1, 1));
        assert!(!cal.is_business_day(d(2025, 1, 1)));
        assert_eq!(cal.name(), "KRW");
        assert_eq!(cal.holidays().count(), 1);
    }

    #[test]
    fn test_holiday_calendar_serde() {
        let json = r#"{"name":"USD","holidays":["2025-07-04"]}"#;
        let cal: HolidayCalendar = serde_json::from_str(json).unwrap();
        assert!(!cal.is_business_day(d(2025, 7, 4)));

        let bare: HolidayCalendar = serde_json::from_str(r#"{"name":"KRW"}"#).unwrap();
        assert_eq!(bare.holidays().count(), 0);
    }
}
