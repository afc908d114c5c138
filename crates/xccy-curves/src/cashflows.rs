//! Cash flow projection for swap legs.
//!
//! Both projectors return undiscounted amounts, one per accrual period paid
//! at the adjusted accrual end, followed by the notional exchange at the
//! schedule end date.

use serde::{Deserialize, Serialize};
use xccy_core::daycounts::DayCount;
use xccy_core::schedule::Schedule;
use xccy_core::Date;

use crate::error::CurveResult;
use crate::traits::Curve;

/// A single dated cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashflowPoint {
    /// Payment date.
    pub payment_date: Date,
    /// Undiscounted amount in leg currency.
    pub amount: f64,
}

impl CashflowPoint {
    /// Creates a cash flow.
    #[must_use]
    pub fn new(payment_date: Date, amount: f64) -> Self {
        Self {
            payment_date,
            amount,
        }
    }
}

/// Projects a fixed leg: `notional * fixed_rate * yf` per period, then the
/// notional at maturity.
#[must_use]
pub fn project_fixed_leg(
    notional: f64,
    fixed_rate: f64,
    schedule: &Schedule,
    day_count: &dyn DayCount,
) -> Vec<CashflowPoint> {
    let mut flows: Vec<CashflowPoint> = schedule
        .periods()
        .map(|(start, end)| {
            let yf = day_count.year_fraction_f64(start, end);
            CashflowPoint::new(end, notional * fixed_rate * yf)
        })
        .collect();
    flows.push(CashflowPoint::new(schedule.end_date(), notional));
    flows
}

/// Projects a floating leg off `projection`: `notional * F(start, end) * yf`
/// per period, then the notional at maturity.
///
/// `F` is the simply compounded forward of the projection curve accrued
/// under `day_count`.
pub fn project_floating_leg(
    projection: &dyn Curve,
    notional: f64,
    schedule: &Schedule,
    day_count: &dyn DayCount,
) -> CurveResult<Vec<CashflowPoint>> {
    let mut flows = Vec::with_capacity(schedule.dates().len());
    for (start, end) in schedule.periods() {
        let forward = projection.forward_rate_between(start, end, day_count)?;
        let yf = day_count.year_fraction_f64(start, end);
        flows.push(CashflowPoint::new(end, notional * forward * yf));
    }
    flows.push(CashflowPoint::new(schedule.end_date(), notional));
    Ok(flows)
}
