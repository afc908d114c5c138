//! Single-currency fixed/floating swap pricing on a forward and a discount
//! curve.

use serde::{Deserialize, Serialize};
use xccy_core::calendars::{BusinessDayConvention, Calendar};
use xccy_core::schedule::Schedule;
use xccy_core::{Date, Tenor};

use crate::config::SwapConventions;
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Which side of the fixed leg the holder is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Pays fixed, receives floating.
    Payer,
    /// Receives fixed, pays floating.
    Receiver,
}

impl SwapDirection {
    /// Sign applied to the floating leg.
    fn floating_sign(self) -> f64 {
        match self {
            Self::Payer => 1.0,
            Self::Receiver => -1.0,
        }
    }
}

impl std::fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payer => write!(f, "Payer"),
            Self::Receiver => write!(f, "Receiver"),
        }
    }
}

/// A vanilla swap without notional exchange.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanillaSwap {
    /// Payer or receiver of fixed.
    pub direction: SwapDirection,
    /// Notional on both legs.
    pub notional: f64,
    /// Tenor from the effective date.
    pub tenor: Tenor,
    /// Fixed coupon rate.
    pub fixed_rate: f64,
    /// Spread over the floating index.
    #[serde(default)]
    pub spread: f64,
    /// Leg conventions.
    #[serde(default)]
    pub conventions: SwapConventions,
}

/// Pricing output, leg values signed from the holder's side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwapValuation {
    /// Net present value.
    pub npv: f64,
    /// Signed fixed leg value.
    pub fixed_leg_npv: f64,
    /// Signed floating leg value.
    pub floating_leg_npv: f64,
    /// Fixed rate that zeroes the NPV.
    pub fair_rate: f64,
    /// Floating spread that zeroes the NPV.
    pub fair_spread: f64,
    /// Effective date.
    pub start_date: Date,
    /// Maturity date.
    pub maturity_date: Date,
}

impl VanillaSwap {
    /// Creates a swap with zero spread and the given conventions.
    #[must_use]
    pub fn new(
        direction: SwapDirection,
        notional: f64,
        tenor: Tenor,
        fixed_rate: f64,
        conventions: SwapConventions,
    ) -> Self {
        Self {
            direction,
            notional,
            tenor,
            fixed_rate,
            spread: 0.0,
            conventions,
        }
    }

    /// Sets the floating spread.
    #[must_use]
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Prices the swap, projecting forwards on `forward` and discounting on
    /// `discount`.
    pub fn price<C: Calendar + ?Sized>(
        &self,
        valuation: Date,
        calendar: &C,
        forward: &dyn Curve,
        discount: &dyn Curve,
    ) -> CurveResult<SwapValuation> {
        if !(self.notional.is_finite() && self.notional > 0.0) {
            return Err(CurveError::invalid_config("swap notional must be positive"));
        }
        if !(self.fixed_rate.is_finite() && self.spread.is_finite()) {
            return Err(CurveError::invalid_config("swap rates must be finite"));
        }

        let conv = &self.conventions;
        let lag = i32::try_from(conv.settlement_days)
            .map_err(|_| CurveError::invalid_config("settlement_days is too large"))?;
        let start = calendar.add_business_days(valuation, lag);
        let maturity = calendar.advance(start, self.tenor, BusinessDayConvention::Following)?;

        let fixed_schedule = Schedule::generate(
            start,
            maturity,
            conv.fixed_frequency,
            calendar,
            BusinessDayConvention::ModifiedFollowing,
        )?;
        let floating_schedule = Schedule::generate(
            start,
            maturity,
            conv.floating_frequency,
            calendar,
            BusinessDayConvention::ModifiedFollowing,
        )?;

        let fixed_dc = conv.fixed_day_count.to_day_count();
        let floating_dc = conv.floating_day_count.to_day_count();

        let mut fixed_annuity = 0.0;
        for (s, e) in fixed_schedule.periods() {
            fixed_annuity += fixed_dc.year_fraction_f64(s, e) * discount.discount(e)?;
        }

        let mut floating_annuity = 0.0;
        let mut index_pv = 0.0;
        for (s, e) in floating_schedule.periods() {
            let weight = floating_dc.year_fraction_f64(s, e) * discount.discount(e)?;
            floating_annuity += weight;
            index_pv += forward.forward_rate_between(s, e, floating_dc.as_ref())? * weight;
        }

        if fixed_annuity <= 0.0 || floating_annuity <= 0.0 {
            return Err(CurveError::invalid_value("swap annuity is not positive"));
        }

        let sign = self.direction.floating_sign();
        let floating_pv = self.notional * (index_pv + self.spread * floating_annuity);
        let fixed_pv = self.notional * self.fixed_rate * fixed_annuity;
        let floating_leg_npv = sign * floating_pv;
        let fixed_leg_npv = -sign * fixed_pv;
        let npv = floating_leg_npv + fixed_leg_npv;

        Ok(SwapValuation {
            npv,
            fixed_leg_npv,
            floating_leg_npv,
            fair_rate: floating_pv / (self.notional * fixed_annuity),
            fair_spread: self.spread - npv / (sign * self.notional * floating_annuity),
            start_date: start,
            maturity_date: fixed_schedule.end_date(),
        })
    }
}
