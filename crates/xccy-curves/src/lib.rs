//! # xccy Curves
//!
//! Cross-currency discount curve construction.
//!
//! The centrepiece is [`CcsDiscountBootstrapper`], which solves the
//! base-currency (USD) discount curve implied by cross-currency swap quotes
//! against a funding-currency (KRW) discount curve and a base-currency
//! projection curve. Around it sit:
//!
//! - [`ZeroCurve`], [`DiscountCurve`] and [`SpreadedCurve`] term structures
//! - a par-swap projection curve bootstrap ([`bootstrap::projection`])
//! - the iterative projection/discount loop ([`bootstrap::iterative`])
//! - vanilla swap pricing ([`swap`]) and curve comparison ([`analysis`])
//!
//! ## Example
//!
//! ```rust
//! use xccy_core::prelude::*;
//! use xccy_curves::prelude::*;
//!
//! let config = CcsBootstrapConfig::new(Date::from_ymd(2024, 12, 11).unwrap(), 1400.0);
//! let mut bootstrapper = CcsDiscountBootstrapper::new(config).unwrap();
//!
//! bootstrapper
//!     .build_funding_discount_curve(&[(Tenor::years(1), 0.03), (Tenor::years(5), 0.03)])
//!     .unwrap();
//! bootstrapper
//!     .build_projection_curve(&[(Tenor::years(1), 0.04), (Tenor::years(5), 0.04)])
//!     .unwrap();
//!
//! let result = bootstrapper
//!     .bootstrap_discount_curve(&[
//!         CcsQuote::new(Tenor::years(1), 0.02),
//!         CcsQuote::new(Tenor::years(5), 0.02),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(result.pillars.len(), 2);
//! let df_5y = result.curve.discount(result.pillars[1].end_date).unwrap();
//! assert!(df_5y < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod analysis;
pub mod bootstrap;
pub mod cashflows;
pub mod compounding;
pub mod config;
pub mod curves;
pub mod error;
pub mod swap;
pub mod traits;
pub mod valuation;

pub use bootstrap::{
    CcsBootstrapResult, CcsDiscountBootstrapper, CurveAssembler, CurvePoint, DfSolution,
    IterativeBootstrapResult, PillarReport,
};
pub use compounding::Compounding;
pub use config::{CcsBootstrapConfig, CcsQuote, LegConventions, MarketData, SolverSettings};
pub use curves::{DiscountCurve, SpreadedCurve, ZeroCurve};
pub use error::{CurveError, CurveResult};
pub use traits::Curve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{compare_curves, discount_factors, forward_rates, zero_rates};
    pub use crate::bootstrap::{
        CcsBootstrapResult, CcsDiscountBootstrapper, CurveAssembler, CurvePoint, DfSolution,
        IterativeBootstrapConfig, IterativeBootstrapResult, PillarReport, ProjectionBootstrapper,
    };
    pub use crate::cashflows::CashflowPoint;
    pub use crate::compounding::Compounding;
    pub use crate::config::{
        CcsBootstrapConfig, CcsQuote, LegConventions, MarketData, SolverSettings,
    };
    pub use crate::curves::{DiscountCurve, SpreadedCurve, ZeroCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::swap::{SwapDirection, SwapValuation, VanillaSwap};
    pub use crate::traits::Curve;
}
