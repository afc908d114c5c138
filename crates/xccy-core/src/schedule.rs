//! Accrual schedule generation for swap legs.
//!
//! Dates are generated forward from the start date at `start + k * months`
//! (no end-of-month rule), the end date is always included, and every date is
//! rolled with the business day convention. Dates that collapse onto each
//! other or onto the adjusted end after rolling are dropped.

use serde::{Deserialize, Serialize};

use crate::calendars::{BusinessDayConvention, Calendar};
use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Frequency};

/// Adjusted accrual dates of a leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// Generates a forward schedule between `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSchedule` if `end` is not after `start`,
    /// or if the adjusted dates leave no accrual period.
    pub fn generate<C: Calendar + ?Sized>(
        start: Date,
        end: Date,
        frequency: Frequency,
        calendar: &C,
        convention: BusinessDayConvention,
    ) -> CoreResult<Self> {
        if end <= start {
            return Err(CoreError::invalid_schedule(format!(
                "end date {end} must be after start date {start}"
            )));
        }

        let step = frequency.months_per_period() as i32;
        let adjusted_end = calendar.adjust(end, convention);

        let mut dates = Vec::new();
        let mut k = 0;
        loop {
            let unadjusted = start.add_months(k * step)?;
            if unadjusted >= end {
                break;
            }
            let adjusted = calendar.adjust(unadjusted, convention);
            if adjusted < adjusted_end && dates.last() != Some(&adjusted) {
                dates.push(adjusted);
            }
            k += 1;
        }
        dates.push(adjusted_end);

        if dates.len() < 2 {
            return Err(CoreError::invalid_schedule(format!(
                "no accrual period between {start} and {end}"
            )));
        }

        Ok(Self { dates })
    }

    /// Builds a schedule from already adjusted dates.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSchedule` unless there are at least two
    /// strictly increasing dates.
    pub fn from_dates(dates: Vec<Date>) -> CoreResult<Self> {
        if dates.len() < 2 {
            return Err(CoreError::invalid_schedule("need at least two dates"));
        }
        if dates.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CoreError::invalid_schedule("dates must be strictly increasing"));
        }
        Ok(Self { dates })
    }

    /// All schedule dates, accrual start first.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Accrual start of the first period.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.dates[0]
    }

    /// Accrual end of the last period.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Iterates over `(accrual_start, accrual_end)` pairs.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }
}
