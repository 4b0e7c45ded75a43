use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use osrb_tree::{Probable, RedBlackTree};
use std::collections::BTreeMap;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Simple LCG for a deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_sets() -> [(&'static str, Vec<i64>); 3] {
    [
        ("ordered", ordered_keys(N)),
        ("reverse", reverse_ordered_keys(N)),
        ("random", random_keys(N)),
    ]
}

fn build_tree(keys: &[i64], unique_keys: bool) -> RedBlackTree<i64, i64> {
    let mut tree = RedBlackTree::new(unique_keys);
    for &k in keys {
        tree.insert(k, k);
    }
    tree
}

// ─── CRUD Benchmarks ────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    for (order, keys) in key_sets() {
        let mut group = c.benchmark_group(format!("insert_{order}"));

        group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
            b.iter(|| build_tree(&keys, true));
        });

        group.bench_function(BenchmarkId::new("RedBlackTree/multi", N), |b| {
            b.iter(|| build_tree(&keys, false));
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.finish();
    }
}

fn bench_get(c: &mut Criterion) {
    for (order, keys) in key_sets() {
        let mut group = c.benchmark_group(format!("get_{order}"));
        let tree = build_tree(&keys, true);
        let map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for k in &keys {
                    sum = sum.wrapping_add(*tree.get(k).unwrap_or(&0));
                }
                sum
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for k in &keys {
                    sum = sum.wrapping_add(*map.get(k).unwrap_or(&0));
                }
                sum
            });
        });

        group.finish();
    }
}

fn bench_remove(c: &mut Criterion) {
    for (order, keys) in key_sets() {
        let mut group = c.benchmark_group(format!("remove_{order}"));
        let tree = build_tree(&keys, true);
        let map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    for k in &keys {
                        tree.remove_one(k);
                    }
                    tree
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.finish();
    }
}

// ─── Order-statistic Benchmarks ─────────────────────────────────────────────

fn bench_get_by_rank(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree = build_tree(&keys, false);
    let map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let mut group = c.benchmark_group("get_by_rank");

    group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in (0..tree.len()).step_by(97) {
                sum = sum.wrapping_add(*tree.at(rank).1);
            }
            sum
        });
    });

    // Linear scan is the only rank lookup BTreeMap offers.
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in (0..map.len()).step_by(97) {
                sum = sum.wrapping_add(*map.values().nth(rank).unwrap_or(&0));
            }
            sum
        });
    });

    group.finish();
}

fn bench_rank_of(c: &mut Criterion) {
    let keys = random_keys(N);
    let tree = build_tree(&keys, false);
    let mut group = c.benchmark_group("rank_of");

    group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
        b.iter(|| keys.iter().filter_map(|k| tree.rank_of(k)).sum::<usize>());
    });

    group.finish();
}

fn bench_probability_of(c: &mut Criterion) {
    let keys: Vec<i64> = random_keys(N).into_iter().map(|k| k % 64).collect();
    let tree = build_tree(&keys, false);
    let probes: Vec<i64> = (0..16).collect();
    let mut group = c.benchmark_group("probability_of");

    group.bench_function(BenchmarkId::new("RedBlackTree", N), |b| {
        b.iter(|| tree.probability_of(&probes));
    });

    group.finish();
}

criterion_group!(crud, bench_insert, bench_get, bench_remove);
criterion_group!(order_statistic, bench_get_by_rank, bench_rank_of, bench_probability_of);
criterion_main!(crud, order_statistic);
