//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Calendar;
use crate::types::Date;

/// How a date falling on a non-business day is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Leave the date as-is.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day unless that crosses into the next
    /// month, in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
        };
        write!(f, "{name}")
    }
}

pub(super) fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => following(date, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() == date.month() {
                adjusted
            } else {
                preceding(date, calendar)
            }
        }
        BusinessDayConvention::Preceding => preceding(date, calendar),
    }
}

fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::WeekendCalendar;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_business_day_is_untouched() {
        let cal = WeekendCalendar;
        let friday = d(2025, 1, 31);
        for conv in [
            BusinessDayConvention::Unadjusted,
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
        ] {
            assert_eq!(cal.adjust(friday, conv), friday);
        }
    }

    #[test]
    fn test_modified_following_stays_in_month() {
        let cal = WeekendCalendar;
        // 2025-05-31 is a Saturday; Following would land on June 2
        let saturday = d(2025, 5, 31);
        assert_eq!(cal.adjust(saturday, BusinessDayConvention::Following), d(2025, 6, 2));
        assert_eq!(
            cal.adjust(saturday, BusinessDayConvention::ModifiedFollowing),
            d(2025, 5, 30)
        );
    }

    #[test]
    fn test_preceding_and_unadjusted() {
        let cal = WeekendCalendar;
        let sunday = d(2025, 6, 1);
        assert_eq!(cal.adjust(sunday, BusinessDayConvention::Preceding), d(2025, 5, 30));
        assert_eq!(cal.adjust(sunday, BusinessDayConvention::Unadjusted), sunday);
    }
}
