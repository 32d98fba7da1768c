use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use optimal_bst::dynamic::{random_instance, solve};
use optimal_bst::ObstSolution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimal_bst_solve");
    for &n in &[16usize, 64, 128, 256] {
        let instance = random_instance(n, &mut ChaCha8Rng::seed_from_u64(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, inst| {
            b.iter(|| solve(black_box(&inst.keys), black_box(&inst.p), black_box(&inst.q)))
        });
    }
    group.finish();
}

fn bench_solution(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimal_bst_solution");
    for &n in &[64usize, 256] {
        let instance = random_instance(n, &mut ChaCha8Rng::seed_from_u64(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &instance, |b, inst| {
            b.iter(|| {
                let obst = ObstSolution::new(inst.keys.clone(), &inst.p, &inst.q).unwrap();
                black_box(obst.in_order().count())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve, bench_solution);
criterion_main!(benches);
