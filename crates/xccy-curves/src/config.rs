//! Bootstrap configuration and market input documents.
//!
//! Everything here is plain serde data. Defaults describe a KRW fixed vs
//! USD SOFR cross-currency swap market.

use serde::{Deserialize, Serialize};
use xccy_core::calendars::HolidayCalendar;
use xccy_core::daycounts::DayCountConvention;
use xccy_core::{Date, Frequency, Tenor};

use crate::error::{CurveError, CurveResult};

// =============================================================================
// LEG CONVENTIONS
// =============================================================================

/// Calendar, day count and payment frequency of one swap leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegConventions {
    /// Business day calendar for schedule and date rolling.
    pub calendar: HolidayCalendar,
    /// Accrual day count. Also the time axis of curves in this currency.
    pub day_count: DayCountConvention,
    /// Payment frequency.
    #[serde(default)]
    pub frequency: Frequency,
}

impl LegConventions {
    /// Creates leg conventions.
    #[must_use]
    pub fn new(calendar: HolidayCalendar, day_count: DayCountConvention, frequency: Frequency) -> Self {
        Self {
            calendar,
            day_count,
            frequency,
        }
    }

    /// KRW fixed leg: ACT/365F, quarterly.
    #[must_use]
    pub fn krw_fixed() -> Self {
        Self::new(
            HolidayCalendar::weekends_only("KRW"),
            DayCountConvention::Act365Fixed,
            Frequency::Quarterly,
        )
    }

    /// USD SOFR floating leg: ACT/360, quarterly.
    #[must_use]
    pub fn usd_floating() -> Self {
        Self::new(
            HolidayCalendar::weekends_only("USD"),
            DayCountConvention::Act360,
            Frequency::Quarterly,
        )
    }
}

/// Fixed and floating leg conventions of a single-currency swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapConventions {
    /// Business days from valuation to the effective date.
    #[serde(default = "default_settlement_days")]
    pub settlement_days: u32,
    /// Fixed leg payment frequency.
    pub fixed_frequency: Frequency,
    /// Fixed leg day count.
    pub fixed_day_count: DayCountConvention,
    /// Floating leg payment frequency.
    pub floating_frequency: Frequency,
    /// Floating leg day count. Also the time axis of the projected curve.
    pub floating_day_count: DayCountConvention,
}

impl SwapConventions {
    /// SOFR OIS: annual ACT/360 on both legs.
    #[must_use]
    pub fn ois() -> Self {
        Self {
            settlement_days: default_settlement_days(),
            fixed_frequency: Frequency::Annual,
            fixed_day_count: DayCountConvention::Act360,
            floating_frequency: Frequency::Annual,
            floating_day_count: DayCountConvention::Act360,
        }
    }

    /// USD IRS: annual 30/360 fixed against quarterly ACT/360 floating.
    #[must_use]
    pub fn irs() -> Self {
        Self {
            settlement_days: default_settlement_days(),
            fixed_frequency: Frequency::Annual,
            fixed_day_count: DayCountConvention::Thirty360US,
            floating_frequency: Frequency::Quarterly,
            floating_day_count: DayCountConvention::Act360,
        }
    }
}

impl Default for SwapConventions {
    fn default() -> Self {
        Self::ois()
    }
}

// =============================================================================
// SOLVER SETTINGS
// =============================================================================

/// Settings of the per-pillar discount factor solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Maximum Newton iterations per pillar.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Absolute PV tolerance.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Lower clamp for discount factors.
    #[serde(default = "default_min_df")]
    pub min_discount_factor: f64,
    /// Upper clamp for discount factors.
    #[serde(default = "default_max_df")]
    pub max_discount_factor: f64,
    /// Fail with `CurveError::CalibrationFailure` instead of returning a
    /// best-effort discount factor.
    #[serde(default)]
    pub strict: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            min_discount_factor: default_min_df(),
            max_discount_factor: default_max_df(),
            strict: false,
        }
    }
}

impl SolverSettings {
    /// Validates the settings.
    pub fn validate(&self) -> CurveResult<()> {
        if self.max_iterations == 0 {
            return Err(CurveError::invalid_config("max_iterations must be positive"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CurveError::invalid_config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        let (lo, hi) = (self.min_discount_factor, self.max_discount_factor);
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo < hi) {
            return Err(CurveError::invalid_config(format!(
                "discount factor bounds [{lo}, {hi}] are invalid"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// CCS BOOTSTRAP CONFIGURATION
// =============================================================================

/// Configuration of the cross-currency discount bootstrap.
///
/// ```rust
/// use xccy_curves::CcsBootstrapConfig;
///
/// let json = r#"{ "valuation_date": "2024-12-11", "spot_fx": 1400.0 }"#;
/// let config = CcsBootstrapConfig::from_json(json).unwrap();
/// assert_eq!(config.settlement_days, 2);
/// assert_eq!(config.base_leg.day_count.name(), "ACT/360");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CcsBootstrapConfig {
    /// Valuation date. Every curve is anchored here.
    pub valuation_date: Date,
    /// Spot FX as units of funding currency per unit of base currency
    /// (KRW per USD).
    pub spot_fx: f64,
    /// Business days from valuation to the swap start date.
    #[serde(default = "default_settlement_days")]
    pub settlement_days: u32,
    /// Funding (KRW fixed) leg conventions.
    #[serde(default = "LegConventions::krw_fixed")]
    pub funding_leg: LegConventions,
    /// Base (USD floating) leg conventions.
    #[serde(default = "LegConventions::usd_floating")]
    pub base_leg: LegConventions,
    /// Per-pillar solver settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

impl CcsBootstrapConfig {
    /// Creates a configuration with market-default conventions.
    #[must_use]
    pub fn new(valuation_date: Date, spot_fx: f64) -> Self {
        Self {
            valuation_date,
            spot_fx,
            settlement_days: default_settlement_days(),
            funding_leg: LegConventions::krw_fixed(),
            base_leg: LegConventions::usd_floating(),
            solver: SolverSettings::default(),
        }
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> CurveResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CurveError::invalid_config(format!("cannot parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CurveResult<()> {
        if !(self.spot_fx.is_finite() && self.spot_fx > 0.0) {
            return Err(CurveError::invalid_config(format!(
                "spot_fx must be positive and finite, got {}",
                self.spot_fx
            )));
        }
        if i32::try_from(self.settlement_days).is_err() {
            return Err(CurveError::invalid_config("settlement_days is too large"));
        }
        self.solver.validate()
    }
}

// =============================================================================
// QUOTES AND MARKET DATA
// =============================================================================

/// A cross-currency swap par quote: funding-currency fixed rate against
/// base-currency floating flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CcsQuote {
    /// Swap tenor from the start date.
    pub tenor: Tenor,
    /// Funding-currency fixed rate as a decimal.
    pub fixed_rate: f64,
    /// Funding-currency notional.
    #[serde(default = "default_notional_funding")]
    pub notional_funding: f64,
    /// Base-currency notional. Derived through spot FX when absent.
    #[serde(default)]
    pub notional_base: Option<f64>,
}

impl CcsQuote {
    /// Creates a quote with the default funding notional.
    #[must_use]
    pub fn new(tenor: Tenor, fixed_rate: f64) -> Self {
        Self {
            tenor,
            fixed_rate,
            notional_funding: default_notional_funding(),
            notional_base: None,
        }
    }

    /// Base-currency notional: explicit, or `notional_funding / spot_fx`.
    #[must_use]
    pub fn resolve_notional_base(&self, spot_fx: f64) -> f64 {
        self.notional_base.unwrap_or(self.notional_funding / spot_fx)
    }

    /// Validates the quote values.
    pub fn validate(&self) -> CurveResult<()> {
        if !self.fixed_rate.is_finite() {
            return Err(CurveError::invalid_config(format!(
                "{} quote: fixed rate is not finite",
                self.tenor
            )));
        }
        let notionals_ok = self.notional_funding.is_finite()
            && self.notional_funding > 0.0
            && self.notional_base.map_or(true, |n| n.is_finite() && n > 0.0);
        if !notionals_ok {
            return Err(CurveError::invalid_config(format!(
                "{} quote: notionals must be positive and finite",
                self.tenor
            )));
        }
        Ok(())
    }
}

/// A `(tenor, rate)` market point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    /// Tenor from the valuation (zero rates) or start date (swap rates).
    pub tenor: Tenor,
    /// Rate as a decimal.
    pub rate: f64,
}

impl From<RatePoint> for (Tenor, f64) {
    fn from(point: RatePoint) -> Self {
        (point.tenor, point.rate)
    }
}

/// Complete market input for a bootstrap run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Bootstrap configuration.
    pub config: CcsBootstrapConfig,
    /// Funding-currency continuously compounded zero rates.
    pub funding_zero_rates: Vec<RatePoint>,
    /// Base-currency continuously compounded zero rates for projection.
    #[serde(default)]
    pub projection_zero_rates: Vec<RatePoint>,
    /// Base-currency OIS par rates, used by the iterative bootstrap.
    #[serde(default)]
    pub ois_quotes: Vec<RatePoint>,
    /// Cross-currency swap quotes.
    pub ccs_quotes: Vec<CcsQuote>,
    /// Tenors for reporting and convergence checks.
    #[serde(default = "default_report_tenors")]
    pub report_tenors: Vec<Tenor>,
}

impl MarketData {
    /// Parses and validates market data from JSON.
    pub fn from_json(json: &str) -> CurveResult<Self> {
        let data: Self = serde_json::from_str(json)
            .map_err(|e| CurveError::invalid_config(format!("cannot parse market data: {e}")))?;
        data.validate()?;
        Ok(data)
    }

    /// Validates the configuration and quote lists.
    pub fn validate(&self) -> CurveResult<()> {
        self.config.validate()?;
        if self.funding_zero_rates.is_empty() {
            return Err(CurveError::invalid_config("funding_zero_rates is empty"));
        }
        if self.projection_zero_rates.is_empty() && self.ois_quotes.is_empty() {
            return Err(CurveError::invalid_config(
                "need projection_zero_rates or ois_quotes",
            ));
        }
        if self.ccs_quotes.is_empty() {
            return Err(CurveError::invalid_config("ccs_quotes is empty"));
        }
        self.ccs_quotes.iter().try_for_each(CcsQuote::validate)
    }

    /// Funding zero rates as `(tenor, rate)` pairs.
    #[must_use]
    pub fn funding_rates(&self) -> Vec<(Tenor, f64)> {
        self.funding_zero_rates.iter().copied().map(Into::into).collect()
    }

    /// Projection zero rates as `(tenor, rate)` pairs.
    #[must_use]
    pub fn projection_rates(&self) -> Vec<(Tenor, f64)> {
        self.projection_zero_rates.iter().copied().map(Into::into).collect()
    }

    /// OIS par quotes as `(tenor, rate)` pairs.
    #[must_use]
    pub fn ois_rates(&self) -> Vec<(Tenor, f64)> {
        self.ois_quotes.iter().copied().map(Into::into).collect()
    }
}

// =============================================================================
// DEFAULT VALUE FUNCTIONS
// =============================================================================

fn default_settlement_days() -> u32 {
    2
}

fn default_max_iterations() -> u32 {
    100
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_min_df() -> f64 {
    0.01
}

fn default_max_df() -> f64 {
    1.5
}

fn default_notional_funding() -> f64 {
    1_000_000_000.0
}

/// Default reporting tenors: 1Y, 2Y, 5Y, 10Y.
#[must_use]
pub fn default_report_tenors() -> Vec<Tenor> {
    vec![
        Tenor::years(1),
        Tenor::years(2),
        Tenor::years(5),
        Tenor::years(10),
    ]
}
