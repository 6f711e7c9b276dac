//! Criterion micro-benchmarks for growth, positional mutation and copying,
//! with `std::vec::Vec` as the baseline for each operation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use revec_array::DynArray;
use revec_bench::{filled, scattered_positions, string_payloads};

/// Benchmark: append 10K elements to an empty array (amortised doubling).
fn bench_push_back_10k(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back_10k");
    group.bench_function("dynarray", |b| {
        b.iter(|| {
            let mut arr = DynArray::new();
            for i in 0..10_000u64 {
                arr.push_back(i);
            }
            black_box(arr);
        });
    });
    group.bench_function("vec", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for i in 0..10_000u64 {
                v.push(i);
            }
            black_box(v);
        });
    });
    group.finish();
}

/// Benchmark: 1K inserts at scattered positions into a 1K-element array.
fn bench_insert_scattered_1k(c: &mut Criterion) {
    let positions = scattered_positions(1_000, 1_000);
    let mut group = c.benchmark_group("insert_scattered_1k");
    group.bench_function("dynarray", |b| {
        b.iter_batched(
            || filled(1_000),
            |mut arr| {
                for &pos in &positions {
                    arr.insert(pos, 0);
                }
                arr
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("vec", |b| {
        b.iter_batched(
            || (0..1_000u64).collect::<Vec<_>>(),
            |mut v| {
                for &pos in &positions {
                    v.insert(pos, 0);
                }
                v
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

/// Benchmark: erase from the front until a 4K-element array is empty.
fn bench_erase_front_4k(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_front_4k");
    group.bench_function("dynarray", |b| {
        b.iter_batched(
            || filled(4_096),
            |mut arr| {
                while !arr.is_empty() {
                    arr.erase(0);
                }
                arr
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("vec", |b| {
        b.iter_batched(
            || (0..4_096u64).collect::<Vec<_>>(),
            |mut v| {
                while !v.is_empty() {
                    v.remove(0);
                }
                v
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

/// Benchmark: copy construction of 10K owned strings.
fn bench_clone_strings_10k(c: &mut Criterion) {
    let source = string_payloads(10_000);
    let baseline: Vec<String> = source.iter().cloned().collect();
    let mut group = c.benchmark_group("clone_strings_10k");
    group.bench_function("dynarray", |b| b.iter(|| black_box(source.clone())));
    group.bench_function("vec", |b| b.iter(|| black_box(baseline.clone())));
    group.finish();
}

/// Benchmark: copy assignment into an array whose storage already fits.
fn bench_clone_from_reuse_10k(c: &mut Criterion) {
    let source = string_payloads(10_000);
    let mut target = string_payloads(10_000);
    c.bench_function("clone_from_reuse_10k", |b| {
        b.iter(|| {
            target.clone_from(&source);
            black_box(target.len());
        });
    });
}

criterion_group!(
    benches,
    bench_push_back_10k,
    bench_insert_scattered_1k,
    bench_erase_front_4k,
    bench_clone_strings_10k,
    bench_clone_from_reuse_10k
);
criterion_main!(benches);
