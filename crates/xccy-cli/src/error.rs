//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;
use xccy_curves::CurveError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Market file could not be read or written.
    #[error("Cannot access {path}: {source}")]
    File {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid command-line value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Market data lacks what the command needs.
    #[error("Missing market data: {0}")]
    MissingData(String),

    /// Curve construction or pricing failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
