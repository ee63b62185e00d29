//! Native vs software kernel benchmarks.
//!
//! Every group runs the same kernel through the dispatcher built from the
//! detected hardware and through the pure software dispatcher, over a batch
//! of registers large enough to hide call overhead but small enough to stay
//! in L1.
//!
//! The slice group compares the sequential and rayon batch layers across
//! sizes crossing the parallel threshold.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lanemath::options::MathOptions;
use lanemath::prelude::*;

// ================================================================================================
// BENCHMARK CONFIGURATION
// ================================================================================================

/// Registers per batch: 4 KiB of `f32` lanes.
const BATCH: usize = 256;

/// Slice lengths for the batch layer. f32 = 4 bytes, so 1M elements = 4 MiB.
const SLICE_SIZES: &[usize] = &[
    1_024,     // 4 KiB
    65_536,    // 256 KiB, parallel threshold
    1_048_576, // 4 MiB
];

fn registers_f32(range: f32) -> Vec<F32x4> {
    let mut rng = StdRng::seed_from_u64(12345);
    (0..BATCH)
        .map(|_| F32x4::from_array(std::array::from_fn(|_| rng.random_range(-range..range))))
        .collect()
}

fn registers_f64(range: f64) -> Vec<F64x4> {
    let mut rng = StdRng::seed_from_u64(12345);
    (0..BATCH)
        .map(|_| F64x4::from_array(std::array::from_fn(|_| rng.random_range(-range..range))))
        .collect()
}

fn dispatchers() -> [(&'static str, Dispatcher); 2] {
    [
        ("native", Dispatcher::default()),
        ("scalar", Dispatcher::scalar(MathOptions::default())),
    ]
}

// ================================================================================================
// REGISTER KERNELS
// ================================================================================================

fn bench_geometry(c: &mut Criterion) {
    let a = registers_f32(100.0);
    let b = registers_f32(100.0);

    let mut group = c.benchmark_group("geometry_f32");
    group.throughput(Throughput::Elements(BATCH as u64));

    for (name, d) in dispatchers() {
        group.bench_with_input(BenchmarkId::new("dot3d", name), &d, |bencher, d| {
            bencher.iter(|| {
                for (x, y) in a.iter().zip(&b) {
                    black_box(d.dot3d(black_box(*x), black_box(*y)));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("cross3d", name), &d, |bencher, d| {
            bencher.iter(|| {
                for (x, y) in a.iter().zip(&b) {
                    black_box(d.cross3d(black_box(*x), black_box(*y)));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("normalize4d", name), &d, |bencher, d| {
            bencher.iter(|| {
                for x in &a {
                    black_box(d.normalize4d(black_box(*x)));
                }
            })
        });
    }

    group.finish();
}

fn bench_fused(c: &mut Criterion) {
    let x = registers_f64(10.0);
    let y = registers_f64(10.0);

    let mut group = c.benchmark_group("fused_f64");
    group.throughput(Throughput::Elements(BATCH as u64));

    for (name, d) in dispatchers() {
        group.bench_with_input(BenchmarkId::new("fused_multiply_add", name), &d, |bencher, d| {
            bencher.iter(|| {
                for (p, q) in x.iter().zip(&y) {
                    black_box(d.fused_multiply_add(black_box(*p), black_box(*q), *p));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("fast_multiply_add", name), &d, |bencher, d| {
            bencher.iter(|| {
                for (p, q) in x.iter().zip(&y) {
                    black_box(d.fast_multiply_add(black_box(*p), black_box(*q), *p));
                }
            })
        });
    }

    group.finish();
}

fn bench_trig(c: &mut Criterion) {
    let angles = registers_f32(10.0);

    let mut group = c.benchmark_group("trig_f32");
    group.throughput(Throughput::Elements(BATCH as u64 * 4));

    for (name, d) in dispatchers() {
        group.bench_with_input(BenchmarkId::new("sin_cos", name), &d, |bencher, d| {
            bencher.iter(|| {
                for v in &angles {
                    black_box(d.sin_cos(black_box(*v)));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("sin_cos_estimate", name), &d, |bencher, d| {
            bencher.iter(|| {
                for v in &angles {
                    black_box(d.sin_cos_estimate(black_box(*v)));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("tan", name), &d, |bencher, d| {
            bencher.iter(|| {
                for v in &angles {
                    black_box(d.tan(black_box(*v)));
                }
            })
        });
    }

    group.finish();
}

// ================================================================================================
// SLICE KERNELS
// ================================================================================================

fn bench_slices(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice_sin_f32");

    for &size in SLICE_SIZES {
        let mut rng = StdRng::seed_from_u64(12345);
        let input: Vec<f32> = (0..size).map(|_| rng.random_range(-10.0..10.0)).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("std", size), &input, |bencher, input| {
            bencher.iter(|| black_box(input.iter().map(|x| x.sin()).collect::<Vec<f32>>()))
        });

        group.bench_with_input(BenchmarkId::new("sequential", size), &input, |bencher, input| {
            bencher.iter(|| black_box(input.as_slice().sin()))
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &input, |bencher, input| {
            bencher.iter(|| black_box(input.as_slice().par_sin()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_geometry, bench_fused, bench_trig, bench_slices);
criterion_main!(benches);
