//! Interest rate compounding conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a quoted rate converts to a discount factor.
///
/// ```rust
/// use xccy_curves::Compounding;
///
/// let df = Compounding::Continuous.discount_factor(0.05, 2.0);
/// assert!((Compounding::Continuous.zero_rate(df, 2.0) - 0.05).abs() < 1e-12);
/// assert!(df < Compounding::Annual.discount_factor(0.05, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// `df = 1 / (1 + r t)`
    Simple,
    /// `df = (1 + r)^-t`
    Annual,
    /// `df = (1 + r/2)^-2t`
    SemiAnnual,
    /// `df = (1 + r/4)^-4t`
    Quarterly,
    /// `df = exp(-r t)`
    #[default]
    Continuous,
}

impl Compounding {
    fn periods_per_year(self) -> Option<f64> {
        match self {
            Compounding::Annual => Some(1.0),
            Compounding::SemiAnnual => Some(2.0),
            Compounding::Quarterly => Some(4.0),
            Compounding::Simple | Compounding::Continuous => None,
        }
    }

    /// Discount factor for `rate` over `t` years.
    #[must_use]
    pub fn discount_factor(self, rate: f64, t: f64) -> f64 {
        match self {
            Compounding::Simple => 1.0 / (1.0 + rate * t),
            Compounding::Continuous => (-rate * t).exp(),
            _ => {
                let n = self.periods_per_year().unwrap_or(1.0);
                (1.0 + rate / n).powf(-n * t)
            }
        }
    }

    /// Rate implied by discount factor `df` over `t` years.
    ///
    /// Returns 0 for `t <= 0`.
    #[must_use]
    pub fn zero_rate(self, df: f64, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        match self {
            Compounding::Simple => (1.0 / df - 1.0) / t,
            Compounding::Continuous => -df.ln() / t,
            _ => {
                let n = self.periods_per_year().unwrap_or(1.0);
                n * (df.powf(-1.0 / (n * t)) - 1.0)
            }
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Simple => "Simple",
            Compounding::Annual => "Annual",
            Compounding::SemiAnnual => "Semi-Annual",
            Compounding::Quarterly => "Quarterly",
            Compounding::Continuous => "Continuous",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factors() {
        assert_relative_eq!(Compounding::Continuous.discount_factor(0.05, 1.0), (-0.05f64).exp());
        assert_relative_eq!(Compounding::Simple.discount_factor(0.05, 0.5), 1.0 / 1.025);
        assert_relative_eq!(
            Compounding::SemiAnnual.discount_factor(0.05, 1.0),
            1.025f64.powi(-2),
            epsilon = 1e-14
        );
        assert_relative_eq!(
            Compounding::Quarterly.discount_factor(0.04, 2.0),
            1.01f64.powi(-8),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_zero_rate_inverts_discount_factor() {
        for comp in [
            Compounding::Simple,
            Compounding::Annual,
            Compounding::SemiAnnual,
            Compounding::Quarterly,
            Compounding::Continuous,
        ] {
            let df = comp.discount_factor(0.037, 3.5);
            assert_relative_eq!(comp.zero_rate(df, 3.5), 0.037, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_rate_at_zero_time() {
        assert_eq!(Compounding::Continuous.zero_rate(1.0, 0.0), 0.0);
    }
}
