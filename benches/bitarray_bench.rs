//! Performance benchmarks for BitArray operations.
//!
//! Covers the lock-and-delegate hot paths (get/set), whole-array scans
//! (is_full, true_indices, pick_random), the text and byte forms, and
//! set_index under contention from other threads.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use syncbits::BitArray;

const SIZES: [usize; 3] = [64, 1024, 10000];

fn half_set(n: usize) -> BitArray {
    let ba = BitArray::new(n).unwrap();
    for i in (0..n).step_by(2) {
        ba.set_index(i, true);
    }
    ba
}

// =============================================================================
// Single Bit Operations
// =============================================================================

fn bench_set_index(c: &mut Criterion) {
    let ba = BitArray::new(10000).unwrap();

    c.bench_function("set_index", |b| {
        let mut i = 0;
        b.iter(|| {
            ba.set_index(black_box(i % 10000), true);
            i += 1;
        });
    });
}

fn bench_get_index(c: &mut Criterion) {
    let ba = half_set(10000);

    c.bench_function("get_index", |b| {
        let mut i = 0;
        b.iter(|| {
            let _ = ba.get_index(black_box(i % 10000));
            i += 1;
        });
    });
}

// =============================================================================
// Whole-Array Scans
// =============================================================================

fn bench_is_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_full");
    for size in SIZES.iter() {
        let ba = BitArray::new(*size).unwrap();
        for i in 0..*size {
            ba.set_index(i, true);
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(ba.is_full()));
        });
    }
    group.finish();
}

fn bench_true_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("true_indices");
    for size in SIZES.iter() {
        let ba = half_set(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(ba.true_indices()));
        });
    }
    group.finish();
}

fn bench_pick_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_random");
    for size in SIZES.iter() {
        let ba = half_set(*size);
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(ba.pick_random_with(&mut rng)));
        });
    }
    group.finish();
}

// =============================================================================
// Encodings
// =============================================================================

fn bench_string(c: &mut Criterion) {
    let ba = half_set(1024);
    c.bench_function("string_indented", |b| {
        b.iter(|| black_box(ba.string_indented(" ")));
    });
}

fn bench_bytes(c: &mut Criterion) {
    let ba = half_set(1024);
    c.bench_function("bytes", |b| {
        b.iter(|| black_box(ba.bytes()));
    });
}

// =============================================================================
// Contention
// =============================================================================

fn bench_contended_set_index(c: &mut Criterion) {
    let ba = Arc::new(BitArray::new(1024).unwrap());
    let stop = Arc::new(AtomicBool::new(false));

    let background: Vec<_> = (0..3)
        .map(|t| {
            let ba = Arc::clone(&ba);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut i = t;
                while !stop.load(Ordering::Relaxed) {
                    ba.set_index(i % 1024, i % 3 == 0);
                    i += 7;
                }
            })
        })
        .collect();

    c.bench_function("set_index_contended", |b| {
        let mut i = 0;
        b.iter(|| {
            ba.set_index(black_box(i % 1024), true);
            i += 1;
        });
    });

    stop.store(true, Ordering::Relaxed);
    for h in background {
        h.join().unwrap();
    }
}

criterion_group!(
    benches,
    bench_set_index,
    bench_get_index,
    bench_is_full,
    bench_true_indices,
    bench_pick_random,
    bench_string,
    bench_bytes,
    bench_contended_set_index,
);
criterion_main!(benches);
