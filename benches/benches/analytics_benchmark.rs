//! Resampling and pair analytics throughput.
//!
//! Run with: `cargo bench --package quantpair-bench --bench analytics_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quantpair_bench::{PairShape, ar1, leg_prices, pair_ticks};
use quantpair_lib::prelude::*;
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    for size in SIZES {
        let ticks = pair_ticks(PairShape::new(size));
        let leg: Vec<Tick> = ticks.iter().filter(|t| t.symbol == "btcusdt").cloned().collect();
        group.throughput(Throughput::Elements(size as u64));
        for timeframe in [Timeframe::Second1, Timeframe::Minute1] {
            group.bench_with_input(
                BenchmarkId::new(timeframe.to_string(), size),
                &leg,
                |b, leg| b.iter(|| resample(black_box(leg), timeframe)),
            );
        }
    }
    group.finish();
}

fn prepare_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");
    for size in SIZES {
        let ticks = pair_ticks(PairShape::new(size));
        group.throughput(Throughput::Elements(ticks.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ticks, |b, ticks| {
            b.iter(|| prepare(black_box(ticks.clone())));
        });
    }
    group.finish();
}

fn pair_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair");
    for size in SIZES {
        let ticks = pair_ticks(PairShape::new(size));
        let a = leg_prices(&ticks, "btcusdt");
        let b_leg = leg_prices(&ticks, "ethusdt");
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("hedge", size), &size, |b, _| {
            b.iter(|| hedge_ratio_and_spread(black_box(&a), black_box(&b_leg)));
        });
        group.bench_with_input(BenchmarkId::new("zscore", size), &size, |b, _| {
            b.iter(|| zscore(black_box(&a), 50));
        });
        group.bench_with_input(BenchmarkId::new("correlation", size), &size, |b, _| {
            b.iter(|| rolling_correlation(black_box(&a), black_box(&b_leg), 50));
        });
    }
    group.finish();
}

fn adf_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("adf");
    group.sample_size(20);
    for size in [200, 2_000, 20_000] {
        let series = ar1(size, 0.5, 11);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &series, |b, series| {
            b.iter(|| adf_test(black_box(series)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    resample_benchmark,
    prepare_benchmark,
    pair_benchmark,
    adf_benchmark
);
criterion_main!(benches);
