use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holonomic_motion::{scurve, Axis, DynamicLimits, Point, SolverParameters, Trajectory};

fn benchmark_solve(c: &mut Criterion) {
    let lim = DynamicLimits::new(2.0, 3.0, 7.0);
    let params = SolverParameters::default();

    c.bench_function("solve_1d", |b| {
        b.iter(|| scurve::solve(Axis::Translation, black_box(5.0), black_box(lim), black_box(&params)))
    });
}

fn benchmark_lookup(c: &mut Criterion) {
    let trans_coarse = DynamicLimits::new(0.5, 0.5, 1.0);
    let rot_coarse = DynamicLimits::new(3.0, 3.0, 6.0);
    let mut traj = Trajectory::new(
        trans_coarse,
        trans_coarse * 0.5,
        rot_coarse,
        rot_coarse * 0.5,
        SolverParameters::default(),
    );
    traj.generate_point_to_point(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0), false);

    c.bench_function("trajectory_lookup", |b| {
        b.iter(|| traj.lookup(black_box(1.0)))
    });
}

criterion_group!(benches, benchmark_solve, benchmark_lookup);
criterion_main!(benches);
