//! Log-linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{find_segment, validate_knots, Extrapolation, Interpolator};

/// Interpolates ln(y) linearly, then exponentiates.
///
/// Used on discount factors: values stay positive and instantaneous forwards
/// are piecewise constant.
///
/// ```rust
/// use xccy_math::interpolation::{Interpolator, LogLinearInterpolator};
///
/// let interp = LogLinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![1.0, 0.97, 0.94]).unwrap();
/// let df = interp.interpolate(1.5).unwrap();
/// assert!((df - (0.97f64 * 0.94).sqrt()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    log_ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LogLinearInterpolator {
    /// Creates a log-linear interpolator without extrapolation.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than 2 points, mismatched lengths,
    /// non-increasing x values or any non-positive y value.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys)?;

        let mut log_ys = Vec::with_capacity(ys.len());
        for (i, &y) in ys.iter().enumerate() {
            if y <= 0.0 {
                return Err(MathError::invalid_input(format!(
                    "y[{i}] = {y} is not positive; log-linear requires positive values"
                )));
            }
            log_ys.push(y.ln());
        }

        Ok(Self {
            xs,
            ys,
            log_ys,
            extrapolation: Extrapolation::None,
        })
    }

    /// Sets the extrapolation behaviour.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Knot x values.
    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.xs
    }

    /// Knot y values.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.ys
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if self.extrapolation == Extrapolation::None && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }

    fn log_slope(&self, i: usize) -> f64 {
        (self.log_ys[i + 1] - self.log_ys[i]) / (self.xs[i + 1] - self.xs[i])
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;

        let n = self.xs.len();
        if self.extrapolation == Extrapolation::Flat {
            if x <= self.xs[0] {
                return Ok(self.ys[0]);
            }
            if x >= self.xs[n - 1] {
                return Ok(self.ys[n - 1]);
            }
        }

        // Exact knot hits avoid an exp(ln(y)) round trip.
        if let Some(i) = self.xs.iter().position(|&k| k == x) {
            return Ok(self.ys[i]);
        }

        let i = find_segment(&self.xs, x);
        Ok((self.log_ys[i] + self.log_slope(i) * (x - self.xs[i])).exp())
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_reproduces_knots_exactly() {
        let ys = vec![1.0, 0.9704455335485082, 0.8187307530779818];
        let interp = LogLinearInterpolator::new(vec![0.0, 1.0, 5.0], ys.clone()).unwrap();
        for (x, y) in [0.0, 1.0, 5.0].iter().zip(&ys) {
            assert_eq!(interp.interpolate(*x).unwrap(), *y);
        }
    }

    #[test]
    fn test_constant_forward_within_segment() {
        // exp(-0.03 t) is reproduced exactly by log-linear interpolation
        let interp =
            LogLinearInterpolator::new(vec![0.0, 2.0], vec![1.0, (-0.06f64).exp()]).unwrap();
        assert_relative_eq!(interp.interpolate(0.7).unwrap(), (-0.021f64).exp(), epsilon = 1e-14);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(LogLinearInterpolator::new(vec![0.0, 1.0], vec![1.0, 0.0]).is_err());
        assert!(LogLinearInterpolator::new(vec![0.0, 1.0], vec![1.0, -0.5]).is_err());
    }

    #[test]
    fn test_flat_extrapolation_holds_boundaries() {
        let interp = LogLinearInterpolator::new(vec![0.5, 1.0], vec![0.99, 0.97])
            .unwrap()
            .with_extrapolation(Extrapolation::Flat);
        assert_eq!(interp.interpolate(0.0).unwrap(), 0.99);
        assert_eq!(interp.interpolate(3.0).unwrap(), 0.97);
    }

    proptest! {
        #[test]
        fn prop_monotone_between_decreasing_knots(x in 0.0f64..10.0) {
            let xs = vec![0.0, 1.0, 5.0, 10.0];
            let ys = vec![1.0, 0.97, 0.82, 0.62];
            let interp = LogLinearInterpolator::new(xs, ys).unwrap();
            let y = interp.interpolate(x).unwrap();
            let y_next = interp.interpolate((x + 0.01).min(10.0)).unwrap();
            prop_assert!(y > 0.0);
            prop_assert!(y_next <= y + 1e-15);
        }
    }
}
