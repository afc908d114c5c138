//! Day count conventions used by the swap legs.
//!
//! - [`Act360`]: Actual/360, the USD SOFR floating leg convention
//! - [`Act365Fixed`]: Actual/365 Fixed, the KRW fixed leg convention
//! - [`Thirty360US`]: 30/360 US, the USD fixed leg of vanilla IRS
//!
//! ```rust
//! use xccy_core::daycounts::{DayCount, DayCountConvention};
//! use xccy_core::types::Date;
//!
//! let dc = "ACT/365".parse::<DayCountConvention>().unwrap().to_day_count();
//! let start = Date::from_ymd(2025, 1, 1).unwrap();
//! let end = Date::from_ymd(2026, 1, 1).unwrap();
//! assert_eq!(dc.year_fraction_f64(start, end), 1.0);
//! ```

mod act360;
mod act365;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use thirty360::Thirty360US;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe so that curves holding them can be
/// shared across threads.
pub trait DayCount: Send + Sync {
    /// Market name of the convention (e.g. "ACT/360").
    fn name(&self) -> &'static str;

    /// Year fraction between two dates. Negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> Decimal;

    /// Day count between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Year fraction as `f64`, for curve arithmetic.
    fn year_fraction_f64(&self, start: Date, end: Date) -> f64 {
        self.year_fraction(start, end).to_f64().unwrap_or(0.0)
    }
}

/// Runtime-selectable day count convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayCountConvention {
    /// Actual/360
    Act360,
    /// Actual/365 Fixed
    Act365Fixed,
    /// 30/360 US (Bond Basis)
    Thirty360US,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation for this convention.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::Thirty360US => Box::new(Thirty360US),
        }
    }

    /// Market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Thirty360US => "30/360 US",
        }
    }

    /// Year fraction as `f64` without boxing.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Act360 => Act360.year_fraction_f64(start, end),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction_f64(start, end),
            DayCountConvention::Thirty360US => Thirty360US.year_fraction_f64(start, end),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a day count string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day count convention: '{0}'")]
pub struct DayCountParseError(pub String);

impl FromStr for DayCountConvention {
    type Err = DayCountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect();

        match normalized.as_str() {
            "ACT/360" | "ACT360" | "A/360" | "ACTUAL/360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT365" | "ACT/365F" | "ACT/365FIXED" | "ACT365FIXED" | "A/365F"
            | "ACTUAL/365FIXED" => Ok(DayCountConvention::Act365Fixed),
            "30/360" | "30/360US" | "THIRTY360" | "THIRTY360US" | "30U/360" | "BONDBASIS" => {
                Ok(DayCountConvention::Thirty360US)
            }
            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for DayCountConvention {
    type Error = DayCountParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCountConvention> for String {
    fn from(dc: DayCountConvention) -> Self {
        dc.name().to_string()
    }
}
