//! Insert benchmarks
//!
//! Compares the per-key and batched insert paths of every representation.
//!
//! # Test Scenarios
//!
//! 1. **Single inserts**: one key at a time, by size and density
//! 2. **Batched inserts**: `insert_sorted` on pre-sorted keys
//! 3. **Clustered keys**: binomial data, where sparse sets only touch a few blocks
//!
//! # Key Metrics
//!
//! - **Throughput**: keys inserted per second

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nbitset::prelude::*;

mod common;
use common::*;

// BENCHMARK 1: Single-key inserts

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for &size in SIZES {
        for &exp in DENSITIES {
            let keys = uniform_data(size, exp, 42);
            let id = format!("{}/1e-{}", size, exp);
            group.throughput(Throughput::Elements(size as u64));

            group.bench_with_input(BenchmarkId::new("dense", &id), &keys, |b, keys| {
                b.iter(|| {
                    let mut set = DenseSet::new();
                    for &key in keys {
                        set.insert(black_box(key));
                    }
                    set
                });
            });

            group.bench_with_input(BenchmarkId::new("dense_presized", &id), &keys, |b, keys| {
                let max = keys.iter().copied().max().unwrap_or(0);
                b.iter(|| {
                    let mut set = DenseSet::with_max_value(max);
                    for &key in keys {
                        set.insert(black_box(key));
                    }
                    set
                });
            });

            group.bench_with_input(BenchmarkId::new("sparse_ordered", &id), &keys, |b, keys| {
                b.iter(|| {
                    let mut set = OrderedSparseSet::<BLOCK>::new().unwrap();
                    for &key in keys {
                        set.insert(black_box(key));
                    }
                    set
                });
            });

            group.bench_with_input(BenchmarkId::new("sparse_hashed", &id), &keys, |b, keys| {
                b.iter(|| {
                    let mut set = HashedSparseSet::<BLOCK>::new().unwrap();
                    for &key in keys {
                        set.insert(black_box(key));
                    }
                    set
                });
            });
        }
    }

    group.finish();
}

// BENCHMARK 2: Batched inserts

fn bench_insert_sorted(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_sorted");

    for &size in SIZES {
        let keys = sorted_uniform_data(size, 1, 7);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("dense", size), &keys, |b, keys| {
            b.iter(|| {
                let mut set = DenseSet::new();
                set.insert_sorted(black_box(keys));
                set
            });
        });

        group.bench_with_input(BenchmarkId::new("sparse_ordered", size), &keys, |b, keys| {
            b.iter(|| {
                let mut set = OrderedSparseSet::<BLOCK>::new().unwrap();
                set.insert_sorted(black_box(keys));
                set
            });
        });

        #[cfg(feature = "rayon")]
        group.bench_with_input(BenchmarkId::new("parallel", size), &keys, |b, keys| {
            b.iter(|| {
                let mut set = ParDenseSet::new();
                set.insert_sorted(black_box(keys));
                set
            });
        });
    }

    group.finish();
}

// BENCHMARK 3: Clustered keys

fn bench_insert_binomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_binomial");

    for &exp in DENSITIES {
        let keys = binomial_data(100_000, exp, 11);
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("dense", exp), &keys, |b, keys| {
            b.iter(|| keys.iter().copied().collect::<DenseSet>());
        });

        group.bench_with_input(BenchmarkId::new("sparse_ordered", exp), &keys, |b, keys| {
            b.iter(|| OrderedSparseSet::<BLOCK>::from_keys(keys.iter().copied()).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_insert_sorted,
    bench_insert_binomial
);
criterion_main!(benches);
