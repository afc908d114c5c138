//! Calendar periods such as `3M` or `10Y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Business days when advanced on a calendar.
    Days,
    /// Calendar weeks.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl TenorUnit {
    fn suffix(self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }
}

/// A calendar period defining a maturity relative to a start date.
///
/// Parses from strings like `"1D"`, `"2W"`, `"6M"`, `"10Y"` (case-insensitive)
/// and the money-market aliases `ON`, `TN`, `SN` (with or without a slash),
/// which all denote one business day.
///
/// ```rust
/// use xccy_core::types::{Tenor, TenorUnit};
///
/// let t: Tenor = "10y".parse().unwrap();
/// assert_eq!(t, Tenor::new(10, TenorUnit::Years));
/// assert!("5Q".parse::<Tenor>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    length: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor.
    #[must_use]
    pub const fn new(length: u32, unit: TenorUnit) -> Self {
        Self { length, unit }
    }

    /// `n` business days.
    #[must_use]
    pub const fn days(n: u32) -> Self {
        Self::new(n, TenorUnit::Days)
    }

    /// `n` months.
    #[must_use]
    pub const fn months(n: u32) -> Self {
        Self::new(n, TenorUnit::Months)
    }

    /// `n` years.
    #[must_use]
    pub const fn years(n: u32) -> Self {
        Self::new(n, TenorUnit::Years)
    }

    /// Number of units.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Period unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }


    /// Parses a tenor string.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTenor` for an empty string, a missing or
    /// malformed count, or an unknown unit.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ON" | "O/N" | "TN" | "T/N" | "SN" | "S/N" => return Ok(Tenor::days(1)),
            "" => return Err(CoreError::invalid_tenor(s, "empty tenor")),
            _ => {}
        }

        // Non-empty, so there is a last char.
        let unit_char = normalized.chars().last().unwrap_or(' ');
        let count = &normalized[..normalized.len() - unit_char.len_utf8()];

        let unit = match unit_char {
            'D' => TenorUnit::Days,
            'W' => TenorUnit::Weeks,
            'M' => TenorUnit::Months,
            'Y' => TenorUnit::Years,
            other => {
                return Err(CoreError::invalid_tenor(
                    s,
                    format!("unknown tenor unit '{other}'"),
                ))
            }
        };

        let length = count
            .parse::<u32>()
            .map_err(|_| CoreError::invalid_tenor(s, format!("invalid period count '{count}'")))?;

        Ok(Self::new(length, unit))
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.suffix())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tenor::parse(s)
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tenor::parse(&value)
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}
