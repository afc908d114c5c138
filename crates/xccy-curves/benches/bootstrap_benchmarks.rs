//! Benchmarks for the cross-currency and projection bootstraps.
//!
//! Run with: cargo bench -p xccy-curves

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use xccy_core::calendars::HolidayCalendar;
use xccy_core::{Date, Tenor};
use xccy_curves::bootstrap::{IterativeBootstrapper, ProjectionBootstrapper};
use xccy_curves::config::SwapConventions;
use xccy_curves::{CcsBootstrapConfig, CcsDiscountBootstrapper, CcsQuote};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn valuation() -> Date {
    Date::from_ymd(2024, 12, 11).unwrap()
}

fn tenors(count: usize) -> Vec<Tenor> {
    (1..=count as u32).map(Tenor::years).collect()
}

fn bootstrapper() -> CcsDiscountBootstrapper {
    let mut b = CcsDiscountBootstrapper::new(CcsBootstrapConfig::new(valuation(), 1400.0)).unwrap();
    b.build_funding_discount_curve(&[(Tenor::years(1), 0.03), (Tenor::years(30), 0.035)])
        .unwrap();
    b.build_projection_curve(&[(Tenor::years(1), 0.04), (Tenor::years(30), 0.045)])
        .unwrap();
    b
}

fn ois_quotes() -> Vec<(Tenor, f64)> {
    tenors(10)
        .into_iter()
        .enumerate()
        .map(|(i, t)| (t, 0.03 + 0.002 * i as f64))
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_ccs_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("ccs_bootstrap");
    let b = bootstrapper();

    for count in [3usize, 10, 20] {
        let quotes: Vec<CcsQuote> = tenors(count).into_iter().map(|t| CcsQuote::new(t, 0.02)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &quotes, |bench, quotes| {
            bench.iter(|| b.bootstrap_discount_curve(black_box(quotes)).unwrap());
        });
    }
    group.finish();
}

fn bench_projection_bootstrap(c: &mut Criterion) {
    let ois = ProjectionBootstrapper::new(valuation(), HolidayCalendar::weekends_only("USD"), SwapConventions::ois());
    let quotes = ois_quotes();
    c.bench_function("ois_bootstrap_10", |bench| {
        bench.iter(|| ois.bootstrap(black_box(&quotes), None).unwrap());
    });
}

fn bench_iterative(c: &mut Criterion) {
    let mut funding_only = CcsDiscountBootstrapper::new(CcsBootstrapConfig::new(valuation(), 1400.0)).unwrap();
    funding_only
        .build_funding_discount_curve(&[(Tenor::years(1), 0.03), (Tenor::years(30), 0.035)])
        .unwrap();
    let ois = ProjectionBootstrapper::new(valuation(), HolidayCalendar::weekends_only("USD"), SwapConventions::ois());
    let ois_quotes = ois_quotes();
    let ccs_quotes: Vec<CcsQuote> = tenors(10).into_iter().map(|t| CcsQuote::new(t, 0.025)).collect();
    let driver = IterativeBootstrapper::default();

    c.bench_function("iterative_10", |bench| {
        bench.iter(|| driver.run(&funding_only, &ois, &ois_quotes, black_box(&ccs_quotes)).unwrap());
    });
}

criterion_group!(benches, bench_ccs_bootstrap, bench_projection_bootstrap, bench_iterative);
criterion_main!(benches);
