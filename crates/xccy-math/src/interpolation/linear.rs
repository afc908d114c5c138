//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{find_segment, validate_knots, Extrapolation, Interpolator};

/// Piecewise linear interpolation.
///
/// ```rust
/// use xccy_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.03, 0.035, 0.04])
///     .unwrap()
///     .with_extrapolation(Extrapolation::Linear);
/// assert!((interp.interpolate(0.5).unwrap() - 0.0325).abs() < 1e-12);
/// assert!((interp.interpolate(3.0).unwrap() - 0.045).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolator {
    /// Creates a linear interpolator without extrapolation.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than 2 points, mismatched lengths,
    /// non-finite values or non-increasing x values.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys)?;
        Ok(Self {
            xs,
            ys,
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
}

impl Interpolator for LinearInterpolator {
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

        let i = find_segment(&self.xs, x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
