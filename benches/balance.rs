use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kdthree::KdTree;
use rand::prelude::*;
use rand::rngs::StdRng;

fn benchmark_balance(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut tree = KdTree::new();
    for _ in 0..10_000 {
        tree.insert([
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
        ]);
    }

    // Every iteration flattens and rebuilds the full tree; node slots and the
    // flatten buffer are reused after the first pass.
    c.bench_function("balance_10000", |b| {
        b.iter(|| {
            tree.balance();
            black_box(tree.height());
        })
    });
}

fn benchmark_balance_factor(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let mut tree = KdTree::new();
    for _ in 0..10_000 {
        tree.insert([
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
            rng.gen_range(0.0..100.0),
        ]);
    }

    c.bench_function("balance_factor_10000", |b| {
        b.iter(|| {
            black_box(tree.balance_factor());
        })
    });
}

criterion_group!(benches, benchmark_balance, benchmark_balance_factor);
criterion_main!(benches);
