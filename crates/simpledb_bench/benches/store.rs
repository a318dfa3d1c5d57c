//! Store benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use simpledb_bench::populated_store;

/// NUMEQUALTO should not grow with the number of keys.
fn bench_num_equal_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("num_equal_to");

    for keys in [1_000, 10_000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(keys), keys, |b, &keys| {
            let store = populated_store(keys, 16);

            b.iter(|| {
                let count = store.num_equal_to(black_box("value7"));
                black_box(count);
            });
        });
    }

    group.finish();
}

/// NUMEQUALTO inside nested transactions should not grow with depth.
fn bench_num_equal_to_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("num_equal_to_nested");

    for depth in [1, 8, 64].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            let mut store = populated_store(10_000, 16);
            for level in 0..depth {
                store.begin();
                store.set(&format!("key{level}"), "value7").unwrap();
            }

            b.iter(|| {
                let count = store.num_equal_to(black_box("value7"));
                black_box(count);
            });
        });
    }

    group.finish();
}

/// Cost of a write inside a transaction and discarding it.
fn bench_begin_set_rollback(c: &mut Criterion) {
    let mut group = c.benchmark_group("begin_set_rollback");

    for writes in [1, 16, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(writes), writes, |b, &writes| {
            let mut store = populated_store(10_000, 16);

            b.iter(|| {
                store.begin();
                for i in 0..writes {
                    store.set(&format!("key{i}"), "fresh").unwrap();
                }
                store.rollback().unwrap();
            });
        });
    }

    group.finish();
}

/// Cost of folding nested layers into the base.
fn bench_nested_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_commit");

    for depth in [1, 4, 16].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(depth), depth, |b, &depth| {
            let mut store = populated_store(10_000, 16);

            b.iter(|| {
                for level in 0..depth {
                    store.begin();
                    store.set(&format!("key{level}"), &format!("value{level}")).unwrap();
                }
                store.commit().unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_num_equal_to,
    bench_num_equal_to_nested,
    bench_begin_set_rollback,
    bench_nested_commit
);
criterion_main!(benches);
