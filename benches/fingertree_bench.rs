//! Benchmarks for the measured tree and the indexed sequence.
//!
//! Compares persistent operations against the standard `Vec` equivalents
//! to keep the constant factors honest: end operations should be within
//! a small factor of `Vec`, while concatenation and mid-sequence edits
//! should win asymptotically on large inputs.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fingertree::{FingerTree, IndexedSeq, Measured, Size};
use std::hint::black_box;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Item(i64);

impl Measured for Item {
    type Measure = Size;

    fn measure(&self) -> Size {
        Size(1)
    }
}

// =============================================================================
// push_back Benchmark
// =============================================================================

fn benchmark_push_back(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("push_back");

    for size in [100, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("FingerTree", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut tree = FingerTree::new();
                    for value in 0..size {
                        tree = tree.push_back(Item(black_box(value)));
                    }
                    black_box(tree)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut vector = Vec::new();
                for value in 0..size {
                    vector.push(black_box(value));
                }
                black_box(vector)
            });
        });
    }

    group.finish();
}

// =============================================================================
// concat Benchmark
// =============================================================================

fn benchmark_concat(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("concat");

    for size in [100, 1000, 10000] {
        let left: FingerTree<Item> = (0..size).map(Item).collect();
        let right: FingerTree<Item> = (size..2 * size).map(Item).collect();
        group.bench_with_input(
            BenchmarkId::new("FingerTree", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(left.concat(&right)));
            },
        );

        let left_vector: Vec<i64> = (0..size).collect();
        let right_vector: Vec<i64> = (size..2 * size).collect();
        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut combined = left_vector.clone();
                combined.extend_from_slice(&right_vector);
                black_box(combined)
            });
        });
    }

    group.finish();
}

// =============================================================================
// split3 Benchmark
// =============================================================================

fn benchmark_split(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("split3");

    for size in [100, 1000, 10000] {
        let tree: FingerTree<Item> = (0..size).map(Item).collect();
        let midpoint = usize::try_from(size).unwrap() / 2;
        group.bench_with_input(
            BenchmarkId::new("FingerTree", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(tree.split3(|measure| measure.0 > midpoint)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark (Random Access)
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1000, 10000] {
        let seq: IndexedSeq<i64> = (0..size).collect();
        let vector: Vec<i64> = (0..size).collect();
        let indices: Vec<usize> = (0..usize::try_from(size).unwrap())
            .step_by(7)
            .collect();

        group.bench_with_input(
            BenchmarkId::new("IndexedSeq", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    for &index in &indices {
                        black_box(seq.get(index));
                    }
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |bencher, _| {
            bencher.iter(|| {
                for &index in &indices {
                    black_box(vector.get(index));
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// set Benchmark (Persistent Update)
// =============================================================================

fn benchmark_set(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set");

    for size in [100, 1000, 10000] {
        let seq: IndexedSeq<i64> = (0..size).collect();
        let midpoint = usize::try_from(size).unwrap() / 2;

        group.bench_with_input(
            BenchmarkId::new("IndexedSeq", size),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(seq.set(midpoint, -1)));
            },
        );

        // The persistent-semantics Vec equivalent clones the whole buffer.
        let vector: Vec<i64> = (0..size).collect();
        group.bench_with_input(BenchmarkId::new("Vec clone", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut cloned = vector.clone();
                cloned[midpoint] = -1;
                black_box(cloned)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_push_back,
    benchmark_concat,
    benchmark_split,
    benchmark_get,
    benchmark_set
);
criterion_main!(benches);
