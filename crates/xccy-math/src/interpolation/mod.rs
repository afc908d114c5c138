//! Interpolation methods for curve construction.
//!
//! - [`LinearInterpolator`]: linear in y (zero rates, spreads)
//! - [`LogLinearInterpolator`]: linear in ln(y) (discount factors)
//!
//! Behaviour outside the data range is chosen explicitly with
//! [`Extrapolation`].

mod linear;
mod log_linear;

pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;

use crate::error::{MathError, MathResult};

/// Trait for one-dimensional interpolators.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// What an interpolator returns outside its data range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Out-of-range queries are an error.
    #[default]
    None,
    /// Hold the boundary value.
    Flat,
    /// Extend the boundary segment.
    Linear,
}

/// Validates a knot set shared by every interpolator.
pub(crate) fn validate_knots(xs: &[f64], ys: &[f64]) -> MathResult<()> {
    if xs.len() < 2 {
        return Err(MathError::insufficient_data(2, xs.len()));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("knots must be finite"));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input(
            "x values must be strictly increasing",
        ));
    }
    Ok(())
}

/// Index `i` of the segment `[xs[i], xs[i+1]]` used for `x`.
pub(crate) fn find_segment(xs: &[f64], x: f64) -> usize {
    let upper = xs.partition_point(|&probe| probe <= x);
    upper.saturating_sub(1).min(xs.len() - 2)
}
