//! Criterion benchmarks for SignalGate hot paths.
//!
//! Benchmarks:
//! 1. Market-structure scoring over typical webhook window sizes
//! 2. Full decision (mode + score + entry gate + message rendering)
//! 3. All three scoring strategies on one window

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use signalgate_core::scoring::all_strategies;
use signalgate_core::{
    score_market, Candle, DecisionEngine, RiskConfig, ScoringContext, SignalInput, Timeframe,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.3).sin() * 10.0 + i as f64 * 0.5;
            Candle {
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 10_000.0 + (i % 7) as f64 * 1_500.0,
            }
        })
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_score_market(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_market");
    for n in [5usize, 14, 50, 200] {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &candles, |b, candles| {
            b.iter(|| score_market(black_box(candles)))
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = DecisionEngine::new(RiskConfig::default());
    let mut group = c.benchmark_group("evaluate");
    for tf in [Timeframe::M5, Timeframe::M15] {
        let input = SignalInput::new("BENCH", "BYBIT", tf, make_candles(30), None)
            .expect("bench candles are valid");
        group.bench_with_input(BenchmarkId::from_parameter(tf), &input, |b, input| {
            b.iter(|| engine.evaluate(black_box(input)))
        });
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let candles = make_candles(30);
    let higher = make_candles(10);
    let strategies = all_strategies();
    c.bench_function("all_strategies_30", |b| {
        b.iter(|| {
            let ctx = ScoringContext::new(black_box(&candles)).with_higher(&higher);
            strategies
                .iter()
                .map(|s| s.evaluate(&ctx).points)
                .sum::<u32>()
        })
    });
}

criterion_group!(benches, bench_score_market, bench_evaluate, bench_strategies);
criterion_main!(benches);
