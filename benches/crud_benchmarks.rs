use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rbtree_collections::{RBTreeMap, RBTreeMultiSet, RBTreeSet};
use std::collections::{BTreeMap, BTreeSet};
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

/// Key sequences every insert/remove benchmark runs against.
fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [("ordered", ordered_keys(N)), ("reverse", reverse_ordered_keys(N)), ("random", random_keys(N))]
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("map_insert_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter(|| {
                let mut map = RBTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
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

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = rb_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_map_remove(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
        let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        let mut group = c.benchmark_group(format!("map_remove_{order}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter_batched(
                || rb_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || bt_map.clone(),
                |mut map| {
                    for k in &keys {
                        map.remove(k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

fn bench_map_traverse(c: &mut Criterion) {
    let keys = random_keys(N);
    let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_traverse");

    group.bench_function(BenchmarkId::new("RBTreeMap/cursor", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            let mut cursor = rb_map.begin();
            while let Some((_, &v)) = cursor.get() {
                sum = sum.wrapping_add(v);
                cursor.move_next();
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("RBTreeMap/iter", N), |b| {
        b.iter(|| rb_map.values().fold(0i64, |sum, &v| sum.wrapping_add(v)));
    });

    group.bench_function(BenchmarkId::new("BTreeMap/iter", N), |b| {
        b.iter(|| bt_map.values().fold(0i64, |sum, &v| sum.wrapping_add(v)));
    });

    group.finish();
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_insert_random");

    group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
        b.iter(|| {
            let mut set = RBTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_set_lower_bound(c: &mut Criterion) {
    let keys: Vec<i64> = random_keys(N).into_iter().map(|k| k & !1).collect();
    let probes: Vec<i64> = keys.iter().map(|k| k + 1).collect();
    let rb_set: RBTreeSet<i64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("set_lower_bound");

    group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
        b.iter(|| probes.iter().filter(|&p| rb_set.lower_bound(p).get().is_some()).count());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| probes.iter().filter(|&p| bt_set.range(p..).next().is_some()).count());
    });

    group.finish();
}

// ─── Multiset Benchmarks ────────────────────────────────────────────────────

fn bench_multiset_insert_duplicates(c: &mut Criterion) {
    // Few distinct values, so most insertions land in long runs of equal keys.
    let keys: Vec<i64> = random_keys(N).into_iter().map(|k| k % 64).collect();
    let mut group = c.benchmark_group("multiset_insert_duplicates");

    group.bench_function(BenchmarkId::new("RBTreeMultiSet", N), |b| {
        b.iter(|| {
            let mut set = RBTreeMultiSet::new();
            for &k in &keys {
                set.insert(k);
            }
            black_box(set.count(&0))
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap<_, usize>", N), |b| {
        b.iter(|| {
            let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
            for &k in &keys {
                *counts.entry(k).or_default() += 1;
            }
            black_box(counts.get(&0).copied().unwrap_or(0))
        });
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_benches, bench_map_insert, bench_map_get_random, bench_map_remove, bench_map_traverse,);

criterion_group!(set_benches, bench_set_insert_random, bench_set_lower_bound,);

criterion_group!(multiset_benches, bench_multiset_insert_duplicates,);

criterion_main!(map_benches, set_benches, multiset_benches,);
