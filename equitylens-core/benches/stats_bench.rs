//! Criterion benchmarks for the statistics engine and chart mapper.
//!
//! Benchmarks:
//! 1. Full summary (drawdown + round-trip matching) over growing curves
//! 2. Round-trip matching alone over alternating ledgers
//! 3. Chart coordinate mapping

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use equitylens_core::chart::{to_chart_series, ChartCanvas};
use equitylens_core::domain::{EquityPoint, Trade};
use equitylens_core::stats::{match_round_trips, summarize};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_curve(n: usize) -> Vec<EquityPoint> {
    (0..n)
        .map(|i| {
            let v = 10_000.0 + (i as f64 * 0.1).sin() * 500.0 + i as f64;
            EquityPoint::new(format!("bar-{i}"), v)
        })
        .collect()
}

fn make_ledger(n: usize) -> Vec<Trade> {
    (0..n)
        .map(|i| {
            let price = 100.0 + (i as f64 * 0.3).cos() * 10.0;
            if i % 2 == 0 {
                Trade::buy(format!("bar-{i}"), 10.0, price, 0.5)
            } else {
                Trade::sell(format!("bar-{i}"), 10.0, price, 0.5)
            }
        })
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");
    for n in [252usize, 2_520, 25_200] {
        let curve = make_curve(n);
        let ledger = make_ledger(n / 10);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| summarize(black_box(&curve), black_box(&ledger)))
        });
    }
    group.finish();
}

fn bench_round_trips(c: &mut Criterion) {
    let ledger = make_ledger(10_000);
    c.bench_function("match_round_trips_10k", |b| {
        b.iter(|| match_round_trips(black_box(&ledger)))
    });
}

fn bench_chart(c: &mut Criterion) {
    let curve = make_curve(2_520);
    let canvas = ChartCanvas::default();
    c.bench_function("to_chart_series_2520", |b| {
        b.iter(|| to_chart_series(black_box(&curve), black_box(&canvas)))
    });
}

criterion_group!(benches, bench_summarize, bench_round_trips, bench_chart);
criterion_main!(benches);
