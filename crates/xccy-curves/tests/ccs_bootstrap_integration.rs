//! Integration test: cross-currency discount curve bootstrap end to end.
//!
//! Market: 11 December 2024 (Wednesday), spot 2 business days later.
//!
//! | Input            | 1Y    | 5Y    | 10Y   |
//! |------------------|-------|-------|-------|
//! | KRW zero (cont.) | 3.00% | 3.00% | 3.00% |
//! | USD zero (cont.) | 4.00% | 4.00% | 4.00% |
//! | USD OIS par      | 3.00% | 4.00% | 5.00% |
//! | KRW/USD CCS      | 2.00% | 2.00% | 2.00% |
//!
//! USDKRW spot 1400, KRW notional 1bn.

use std::sync::Arc;

use approx::assert_relative_eq;
use xccy_core::prelude::*;
use xccy_curves::bootstrap::{IterativeBootstrapConfig, IterativeBootstrapper, ProjectionBootstrapper};
use xccy_curves::cashflows::{project_fixed_leg, project_floating_leg};
use xccy_curves::config::SwapConventions;
use xccy_curves::prelude::*;
use xccy_curves::valuation::present_value;

fn valuation() -> Date {
    Date::from_ymd(2024, 12, 11).unwrap()
}

fn flat(rate: f64) -> Vec<(Tenor, f64)> {
    vec![
        (Tenor::years(1), rate),
        (Tenor::years(5), rate),
        (Tenor::years(10), rate),
    ]
}

fn bootstrapper(funding: f64, projection: f64) -> CcsDiscountBootstrapper {
    let mut b = CcsDiscountBootstrapper::new(CcsBootstrapConfig::new(valuation(), 1400.0)).unwrap();
    b.build_funding_discount_curve(&flat(funding)).unwrap();
    b.build_projection_curve(&flat(projection)).unwrap();
    b
}

fn ccs_quotes(rate: f64, tenors: &[Tenor]) -> Vec<CcsQuote> {
    tenors.iter().map(|&t| CcsQuote::new(t, rate)).collect()
}

/// Relative mismatch between the KRW leg (converted) and the USD leg, both
/// valued on the bootstrapped curves.
fn repricing_error(b: &CcsDiscountBootstrapper, curve: &DiscountCurve, quote: &CcsQuote, end: Date) -> f64 {
    let config = b.config();
    let start = b.start_date();

    let funding_leg = &config.funding_leg;
    let funding_schedule = Schedule::generate(
        start,
        end,
        funding_leg.frequency,
        &funding_leg.calendar,
        BusinessDayConvention::ModifiedFollowing,
    )
    .unwrap();
    let funding_dc = funding_leg.day_count.to_day_count();
    let funding_flows = project_fixed_leg(quote.notional_funding, quote.fixed_rate, &funding_schedule, funding_dc.as_ref());
    let target = present_value(&funding_flows, &**b.funding_curve().unwrap()).unwrap() / config.spot_fx;

    let base_leg = &config.base_leg;
    let base_schedule = Schedule::generate(
        start,
        end,
        base_leg.frequency,
        &base_leg.calendar,
        BusinessDayConvention::ModifiedFollowing,
    )
    .unwrap();
    let base_dc = base_leg.day_count.to_day_count();
    let base_flows = project_floating_leg(
        &**b.projection_curve().unwrap(),
        quote.resolve_notional_base(config.spot_fx),
        &base_schedule,
        base_dc.as_ref(),
    )
    .unwrap();
    let pv = present_value(&base_flows, curve).unwrap();

    ((pv - target) / target).abs()
}

#[test]
fn test_single_instrument_reprices() {
    let b = bootstrapper(0.03, 0.04);
    let quotes = ccs_quotes(0.02, &[Tenor::years(1)]);
    let result = b.bootstrap_discount_curve(&quotes).unwrap();

    assert_eq!(result.pillars.len(), 1);
    let pillar = result.pillars[0];
    assert_eq!(result.start_date, Date::from_ymd(2024, 12, 13).unwrap());
    assert_eq!(pillar.end_date, Date::from_ymd(2025, 12, 15).unwrap());
    assert!(repricing_error(&b, &result.curve, &quotes[0], pillar.end_date) < 1e-9);
}

#[test]
fn test_three_tenor_scenario() {
    let b = bootstrapper(0.03, 0.04);
    let quotes = ccs_quotes(0.02, &[Tenor::years(1), Tenor::years(5), Tenor::years(10)]);
    let result = b.bootstrap_discount_curve(&quotes).unwrap();

    for (pillar, quote) in result.pillars.iter().zip(&quotes) {
        // Absolute tolerance is tight against PVs near 714k USD, so check
        // the relative residual and the repricing instead of `converged`.
        let target_scale = quote.notional_funding / 1400.0;
        assert!((pillar.residual / target_scale).abs() < 1e-9, "{}: {}", pillar.tenor, pillar.residual);
        assert!(repricing_error(&b, &result.curve, quote, pillar.end_date) < 1e-9);
    }

    // A KRW coupon below KRW rates makes the KRW leg cheap; the USD leg must
    // be discounted harder than its 4% projection.
    for pillar in &result.pillars {
        assert!(pillar.zero_rate > 0.04, "{}: {}", pillar.tenor, pillar.zero_rate);
        assert!(pillar.zero_rate < 0.08);
    }
}

#[test]
fn test_discount_factors_decrease() {
    let b = bootstrapper(0.03, 0.04);
    let tenors: Vec<Tenor> = ["6M", "1Y", "2Y", "3Y", "5Y", "7Y", "10Y"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let result = b.bootstrap_discount_curve(&ccs_quotes(0.025, &tenors)).unwrap();

    let dfs: Vec<f64> = result.pillars.iter().map(|p| p.discount_factor).collect();
    assert!(dfs.windows(2).all(|w| w[1] < w[0]), "{dfs:?}");
    assert!(dfs.iter().all(|df| *df > 0.01 && *df < 1.0));
}

#[test]
fn test_curve_reproduces_knots_and_interpolates() {
    let b = bootstrapper(0.03, 0.04);
    let quotes = ccs_quotes(0.02, &[Tenor::years(1), Tenor::years(5), Tenor::years(10)]);
    let result = b.bootstrap_discount_curve(&quotes).unwrap();
    let curve = &result.curve;

    assert_relative_eq!(curve.discount(valuation()).unwrap(), 1.0, epsilon = 1e-15);
    for pillar in &result.pillars {
        assert_relative_eq!(curve.discount(pillar.end_date).unwrap(), pillar.discount_factor, epsilon = 1e-14);
    }

    // Log-linear between the 1Y and 5Y knots
    let (p1, p5) = (result.pillars[0], result.pillars[1]);
    let mid = Date::from_ymd(2027, 6, 15).unwrap();
    let dc = DayCountConvention::Act360;
    let t1 = dc.year_fraction(valuation(), p1.end_date);
    let t5 = dc.year_fraction(valuation(), p5.end_date);
    let t = dc.year_fraction(valuation(), mid);
    let w = (t - t1) / (t5 - t1);
    let expected = (p1.discount_factor.ln() * (1.0 - w) + p5.discount_factor.ln() * w).exp();
    assert_relative_eq!(curve.discount(mid).unwrap(), expected, epsilon = 1e-12);

    // Flat zero rate past the last knot
    let last = result.pillars[2];
    let beyond = last.end_date.add_years(5).unwrap();
    assert_relative_eq!(
        curve.zero_rate_at(beyond, Compounding::Continuous).unwrap(),
        last.zero_rate,
        epsilon = 1e-12
    );
}

#[test]
fn test_unsorted_quotes_match_sorted() {
    let b = bootstrapper(0.03, 0.04);
    let sorted = ccs_quotes(0.02, &[Tenor::years(1), Tenor::years(5), Tenor::years(10)]);
    let shuffled = vec![sorted[2], sorted[0], sorted[1]];

    let a = b.bootstrap_discount_curve(&sorted).unwrap();
    let c = b.bootstrap_discount_curve(&shuffled).unwrap();
    assert_eq!(a.pillars, c.pillars);
}

#[test]
fn test_explicit_base_notional_scales_target() {
    let b = bootstrapper(0.03, 0.04);
    let mut quote = CcsQuote::new(Tenor::years(5), 0.02);
    quote.notional_base = Some(1e9 / 1400.0);
    let explicit = b.bootstrap_discount_curve(&[quote]).unwrap();
    let derived = b.bootstrap_discount_curve(&ccs_quotes(0.02, &[Tenor::years(5)])).unwrap();
    assert_relative_eq!(
        explicit.pillars[0].discount_factor,
        derived.pillars[0].discount_factor,
        epsilon = 1e-12
    );
}

#[test]
fn test_configuration_errors() {
    let b = CcsDiscountBootstrapper::new(CcsBootstrapConfig::new(valuation(), 1400.0)).unwrap();
    assert!(matches!(
        b.bootstrap_discount_curve(&ccs_quotes(0.02, &[Tenor::years(1)])),
        Err(CurveError::MissingCurve { .. })
    ));

    assert!("5X".parse::<Tenor>().is_err());
    assert!("".parse::<Tenor>().is_err());
    assert!(MarketData::from_json("{}").is_err());

    let bad = CcsQuote::new(Tenor::years(1), f64::INFINITY);
    assert!(bootstrapper(0.03, 0.04).bootstrap_discount_curve(&[bad]).is_err());
}

#[test]
fn test_market_data_drives_bootstrap() {
    let json = r#"{
        "config": { "valuation_date": "2024-12-11", "spot_fx": 1400.0 },
        "funding_zero_rates": [
            { "tenor": "1Y", "rate": 0.03 },
            { "tenor": "10Y", "rate": 0.03 }
        ],
        "projection_zero_rates": [
            { "tenor": "1Y", "rate": 0.04 },
            { "tenor": "10Y", "rate": 0.04 }
        ],
        "ccs_quotes": [
            { "tenor": "2Y", "fixed_rate": 0.02 },
            { "tenor": "5Y", "fixed_rate": 0.02 }
        ]
    }"#;
    let market = MarketData::from_json(json).unwrap();
    assert_eq!(market.report_tenors.len(), 4);

    let mut b = CcsDiscountBootstrapper::new(market.config.clone()).unwrap();
    b.build_funding_discount_curve(&market.funding_rates()).unwrap();
    b.build_projection_curve(&market.projection_rates()).unwrap();
    let result = b.bootstrap_discount_curve(&market.ccs_quotes).unwrap();
    assert_eq!(result.pillars.len(), 2);
}

#[test]
fn test_projection_bootstrap_reprices_par_swaps() {
    let calendar = HolidayCalendar::weekends_only("USD");
    let ois = ProjectionBootstrapper::new(valuation(), calendar.clone(), SwapConventions::ois());
    let quotes = vec![(Tenor::years(1), 0.03), (Tenor::years(5), 0.04), (Tenor::years(10), 0.05)];
    let curve = ois.bootstrap(&quotes, None).unwrap();

    for &(tenor, rate) in &quotes {
        let swap = VanillaSwap::new(SwapDirection::Payer, 1e6, tenor, rate, SwapConventions::ois());
        let priced = swap.price(valuation(), &calendar, &curve, &curve).unwrap();
        assert_relative_eq!(priced.fair_rate, rate, epsilon = 1e-9);
        assert!(priced.npv.abs() < 1e-3);
    }
}

#[test]
fn test_iterative_loop_converges() {
    let mut ccs = CcsDiscountBootstrapper::new(CcsBootstrapConfig::new(valuation(), 1400.0)).unwrap();
    ccs.build_funding_discount_curve(&flat(0.03)).unwrap();
    let ois = ProjectionBootstrapper::new(valuation(), HolidayCalendar::weekends_only("USD"), SwapConventions::ois());

    let ois_quotes = vec![(Tenor::years(1), 0.03), (Tenor::years(5), 0.04), (Tenor::years(10), 0.05)];
    let quotes = ccs_quotes(0.025, &[Tenor::years(1), Tenor::years(5), Tenor::years(10)]);

    let config = IterativeBootstrapConfig {
        max_iterations: 25,
        tolerance: 1e-8,
        ..IterativeBootstrapConfig::default()
    };
    let result = IterativeBootstrapper::new(config).run(&ccs, &ois, &ois_quotes, &quotes).unwrap();

    assert!(result.converged, "history: {:?}", result.history);
    assert!(result.max_projection_change < 1e-8);
    assert!(result.max_discount_change < 1e-8);

    // Both change sequences shrink at every round
    let projection_changes: Vec<f64> = result
        .history
        .iter()
        .filter_map(|r| r.max_projection_change)
        .collect();
    let discount_changes: Vec<f64> = result
        .history
        .iter()
        .filter_map(|r| r.max_discount_change)
        .collect();
    assert!(projection_changes.len() >= 2, "{projection_changes:?}");
    assert!(projection_changes.windows(2).all(|w| w[1] <= w[0]), "{projection_changes:?}");
    assert!(discount_changes.windows(2).all(|w| w[1] <= w[0]), "{discount_changes:?}");

    let basis = xccy_curves::analysis::ccs_basis(
        &*result.projection_curve,
        &*result.discount_curve,
        &[Tenor::years(5)],
        &WeekendCalendar,
    )
    .unwrap();
    assert!(basis[0].basis_bps.is_finite());
}

#[test]
fn test_spreaded_funding_curve_lowers_discount_factors() {
    let b = bootstrapper(0.03, 0.04);
    let quotes = ccs_quotes(0.02, &[Tenor::years(1), Tenor::years(5)]);
    let base = b.bootstrap_discount_curve(&quotes).unwrap();

    let base_curve: Arc<dyn Curve> = base.curve.clone();
    let flat_spread = SpreadedCurve::flat(Arc::clone(&base_curve), 25.0);
    let term = SpreadedCurve::term(
        Arc::clone(&base_curve),
        &[(Tenor::years(1), 10.0), (Tenor::years(5), 30.0)],
        &WeekendCalendar,
    )
    .unwrap();

    let date = Date::from_ymd(2029, 12, 13).unwrap();
    let df = base_curve.discount(date).unwrap();
    assert!(flat_spread.discount(date).unwrap() < df);
    assert!(term.discount(date).unwrap() < df);

    let z_base = base_curve.zero_rate_at(date, Compounding::Continuous).unwrap();
    let z_flat = flat_spread.zero_rate_at(date, Compounding::Continuous).unwrap();
    assert_relative_eq!(z_flat - z_base, 0.0025, epsilon = 1e-12);
}
