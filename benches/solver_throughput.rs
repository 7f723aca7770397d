use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use circuit_dynamics::circuits::device::QuadraticDevice;
use circuit_dynamics::solvers::{LinearRcSolver, NonlinearRcSolver, RlcSolver};
use circuit_dynamics::sources::{Sinusoid, Step};

fn bench_first_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_order");
    let linear = LinearRcSolver::new(1000.0, 1e-4, 1e-5).unwrap();
    let quadratic = NonlinearRcSolver::new(1e-3, 1e-5, QuadraticDevice::default()).unwrap();
    let drive = Sinusoid::new(5.0, 50.0);

    group.bench_function(BenchmarkId::new("linear_rc_step", 100_001), |b| {
        b.iter(|| linear.solve_step(5.0, 1.0, 0.0).unwrap())
    });
    group.bench_function(BenchmarkId::new("quadratic_rc_sine", 100_001), |b| {
        b.iter(|| quadratic.solve(&drive, 1.0, 0.0).unwrap())
    });
    group.finish();
}

fn bench_rlc(c: &mut Criterion) {
    let mut group = c.benchmark_group("rlc");
    let solver = RlcSolver::new(10.0, 0.01, 1e-4, 1e-7).unwrap();

    group.bench_function(BenchmarkId::new("step", 200_001), |b| {
        b.iter(|| solver.solve(&Step { amplitude: 1.0 }, 0.02, 0.0, 0.0).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_first_order, bench_rlc);
criterion_main!(benches);
