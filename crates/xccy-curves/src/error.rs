//! Error types for curve construction and bootstrapping.

use thiserror::Error;
use xccy_core::{CoreError, Date};
use xccy_math::MathError;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A curve the operation depends on has not been built yet.
    #[error("Missing curve: {name} must be built first")]
    MissingCurve {
        /// Which curve is missing.
        name: String,
    },

    /// Two quotes resolve to the same maturity date.
    #[error("Duplicate maturity {date}: quotes {first} and {second} roll to the same date")]
    DuplicateMaturity {
        /// The shared maturity date.
        date: Date,
        /// First quote's tenor.
        first: String,
        /// Second quote's tenor.
        second: String,
    },

    /// A curve point was appended out of date order.
    #[error("Non-monotonic dates: {date} is not after {previous}")]
    NonMonotonicDates {
        /// The last accepted date.
        previous: Date,
        /// The rejected date.
        date: Date,
    },

    /// Configuration or market input failed validation.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Calibration did not reach its tolerance.
    #[error(
        "Calibration failed after {iterations} iterations (residual: {residual:.2e}): {message}"
    )]
    CalibrationFailure {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
        /// Description of failure.
        message: String,
    },

    /// Not enough points to build a curve.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Invalid value (NaN, Inf, or domain error).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of the invalid value.
        reason: String,
    },

    /// Numerical routine failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Date, tenor, calendar or schedule failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates a missing curve error.
    #[must_use]
    pub fn missing_curve(name: impl Into<String>) -> Self {
        Self::MissingCurve { name: name.into() }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failed(iterations: u32, residual: f64, message: impl Into<String>) -> Self {
        Self::CalibrationFailure {
            iterations,
            residual,
            message: message.into(),
        }
    }
}
