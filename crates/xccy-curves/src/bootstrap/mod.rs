//! Curve bootstrap algorithms.
//!
//! - **CCS discount bootstrap** ([`CcsDiscountBootstrapper`]): solves the
//!   base-currency discount curve, pillar by pillar, from cross-currency
//!   swap quotes.
//! - **Projection bootstrap** ([`ProjectionBootstrapper`]): sequential
//!   par-swap bootstrap of an OIS/IRS projection curve, self-discounted or
//!   discounted on an external curve.
//! - **Iterative loop** ([`IterativeBootstrapper`]): alternates the two until
//!   the projection and discount curves stop moving.
//!
//! The per-pillar pieces are public as well: [`CurveAssembler`] accumulates
//! solved points and [`DfSolver`] solves one discount factor.

mod assembler;
mod ccs;
mod iterative;
mod projection;
mod solver;

pub use assembler::{CurveAssembler, CurvePoint};
pub use ccs::{CcsBootstrapResult, CcsDiscountBootstrapper, PillarReport};
pub use iterative::{
    IterationRecord, IterativeBootstrapConfig, IterativeBootstrapResult, IterativeBootstrapper,
};
pub use projection::ProjectionBootstrapper;
pub use solver::{DfSolution, DfSolver};
