//! Benchmark for the setkit containers.
//!
//! Compares the three `Set` implementations on insertion and lookup, with the
//! standard `BTreeSet` and `HashSet` as baselines.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use setkit::set::{BalancedTreeSet, ChainedHashSet, RandomPromotion, TieredLinkedSet};
use std::collections::{BTreeSet, HashSet};
use std::hint::black_box;

const SIZES: [u64; 3] = [100, 1_000, 10_000];

fn shuffled(size: u64) -> Vec<u64> {
    let mut elements: Vec<u64> = (0..size).collect();
    elements.shuffle(&mut StdRng::seed_from_u64(size));
    elements
}

// =============================================================================
// add Benchmark
// =============================================================================

fn benchmark_add(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("add");

    for size in SIZES {
        let elements = shuffled(size);

        group.bench_with_input(
            BenchmarkId::new("BalancedTreeSet", size),
            &elements,
            |bencher, elements| {
                bencher.iter(|| {
                    let mut set = BalancedTreeSet::new();
                    for element in elements {
                        set.add(black_box(*element));
                    }
                    black_box(set)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("ChainedHashSet", size),
            &elements,
            |bencher, elements| {
                bencher.iter(|| {
                    let mut set = ChainedHashSet::with_default_hasher();
                    for element in elements {
                        set.add(black_box(*element));
                    }
                    black_box(set)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("TieredLinkedSet", size),
            &elements,
            |bencher, elements| {
                bencher.iter(|| {
                    let mut set = TieredLinkedSet::with_promotion(RandomPromotion::with_seed(size));
                    for element in elements {
                        set.add(black_box(*element));
                    }
                    black_box(set)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeSet", size),
            &elements,
            |bencher, elements| {
                bencher.iter(|| {
                    let mut set = BTreeSet::new();
                    for element in elements {
                        set.insert(black_box(*element));
                    }
                    black_box(set)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("HashSet", size),
            &elements,
            |bencher, elements| {
                bencher.iter(|| {
                    let mut set = HashSet::new();
                    for element in elements {
                        set.insert(black_box(*element));
                    }
                    black_box(set)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// contains Benchmark
// =============================================================================

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("contains");

    for size in SIZES {
        let elements = shuffled(size);
        // Half of the probes miss.
        let probes: Vec<u64> = (0..size * 2).step_by(2).collect();

        let tree: BalancedTreeSet<u64> = elements.iter().copied().collect();
        let table: ChainedHashSet<u64> = elements.iter().copied().collect();
        let list: TieredLinkedSet<u64> = {
            let mut list = TieredLinkedSet::with_promotion(RandomPromotion::with_seed(size));
            list.extend(elements.iter().copied());
            list
        };

        group.bench_with_input(
            BenchmarkId::new("BalancedTreeSet", size),
            &probes,
            |bencher, probes| {
                bencher.iter(|| {
                    probes
                        .iter()
                        .filter(|probe| tree.contains(black_box(*probe)))
                        .count()
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("ChainedHashSet", size),
            &probes,
            |bencher, probes| {
                bencher.iter(|| {
                    probes
                        .iter()
                        .filter(|probe| table.contains(black_box(*probe)))
                        .count()
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("TieredLinkedSet", size),
            &probes,
            |bencher, probes| {
                bencher.iter(|| {
                    probes
                        .iter()
                        .filter(|probe| list.contains(black_box(*probe)))
                        .count()
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// clone Benchmark
// =============================================================================

fn benchmark_clone(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("clone");

    for size in SIZES {
        let elements = shuffled(size);
        let tree: BalancedTreeSet<u64> = elements.iter().copied().collect();
        let list: TieredLinkedSet<u64> = {
            let mut list = TieredLinkedSet::with_promotion(RandomPromotion::with_seed(size));
            list.extend(elements.iter().copied());
            list
        };

        group.bench_function(BenchmarkId::new("BalancedTreeSet", size), |bencher| {
            bencher.iter(|| black_box(tree.clone()));
        });

        group.bench_function(BenchmarkId::new("TieredLinkedSet", size), |bencher| {
            bencher.iter(|| black_box(list.clone()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_add, benchmark_contains, benchmark_clone);
criterion_main!(benches);
