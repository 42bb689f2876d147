//! Tick store write and read throughput.
//!
//! Run with: `cargo bench --package quantpair-bench --bench store_benchmark`

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quantpair_bench::{PairShape, START_MS, pair_ticks};
use quantpair_lib::prelude::*;
use std::hint::black_box;
use tempfile::TempDir;

fn open_temp() -> (TempDir, TickStore) {
    let dir = TempDir::new().unwrap();
    let store = TickStore::open(dir.path().join("ticks.db")).unwrap();
    (dir, store)
}

fn write_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_write");
    group.sample_size(10);
    for size in [1_000, 10_000] {
        let ticks = pair_ticks(PairShape::new(size / 2));
        group.throughput(Throughput::Elements(ticks.len() as u64));

        group.bench_with_input(BenchmarkId::new("batch", size), &ticks, |b, ticks| {
            b.iter_batched(
                open_temp,
                |(_dir, store)| store.insert_batch(black_box(ticks)).unwrap(),
                BatchSize::PerIteration,
            );
        });
        group.bench_with_input(BenchmarkId::new("single", size), &ticks, |b, ticks| {
            b.iter_batched(
                open_temp,
                |(_dir, store)| {
                    for tick in ticks {
                        store.insert(black_box(tick)).unwrap();
                    }
                },
                BatchSize::PerIteration,
            );
        });
    }
    group.finish();
}

fn read_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_read");
    for size in [10_000, 100_000] {
        let (_dir, store) = open_temp();
        let ticks = pair_ticks(PairShape::new(size / 2));
        store.insert_batch(&ticks).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(BenchmarkId::new("get_all", size), |b| {
            b.iter(|| store.get_all().unwrap());
        });
        group.bench_function(BenchmarkId::new("get_range_tail", size), |b| {
            let from = START_MS + (size as i64 / 4) * 250;
            b.iter(|| store.get_range("btcusdt", black_box(from), i64::MAX).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, write_benchmark, read_benchmark);
criterion_main!(benches);
