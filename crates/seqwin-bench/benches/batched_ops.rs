//! Criterion benchmarks for batched stepping.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use seqwin_bench::batch_profile;

fn bench_step_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_all");
    for n in [1usize, 8, 32] {
        let mut batch = batch_profile(n, 42).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                if batch.exhausted().contains(&true) {
                    batch.reset_all();
                }
                let results = batch.step_all(vec![1.0; n]).unwrap();
                black_box(&results);
            });
        });
    }
    group.finish();
}

fn bench_reset_all(c: &mut Criterion) {
    let mut batch = batch_profile(32, 42).unwrap();
    c.bench_function("reset_all_32", |b| b.iter(|| black_box(batch.reset_all())));
}

criterion_group!(benches, bench_step_all, bench_reset_all);
criterion_main!(benches);
