use axis_rs::core::AxisOptions;
use axis_rs::{Axis, LinearAxis, LogarithmicAxis};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_linear_scale_computation(c: &mut Criterion) {
    let options = AxisOptions {
        min_space: 40.0,
        ..AxisOptions::default()
    };

    c.bench_function("linear_scale_computation", |b| {
        b.iter(|| {
            let mut axis = LinearAxis::with_options(
                black_box(500.0),
                black_box(-13.7),
                black_box(91.3),
                options,
            )
            .expect("valid axis");
            let _ = axis.grid_points(None).expect("scale computes");
        })
    });
}

fn bench_linear_grid_points(c: &mut Criterion) {
    let options = AxisOptions {
        min_space: 20.0,
        ..AxisOptions::default()
    };
    let mut axis =
        LinearAxis::with_options(2_000.0, 0.0, 1_000.0, options).expect("valid axis");
    axis.grid_points(None).expect("scale computes");

    c.bench_function("linear_grid_points", |b| {
        b.iter(|| {
            let _ = axis.grid_points(black_box(Some(0.0))).expect("points");
        })
    });
}

fn bench_linear_position_round_trip(c: &mut Criterion) {
    let mut axis = LinearAxis::new(1_000.0, -250.0, 750.0).expect("valid axis");
    axis.grid_points(None).expect("scale computes");

    c.bench_function("linear_position_round_trip", |b| {
        b.iter(|| {
            let value = axis.value(black_box(421.5)).expect("value");
            let _ = axis.position(value).expect("position");
        })
    });
}

fn bench_log_grid_points(c: &mut Criterion) {
    let mut axis = LogarithmicAxis::new(900.0, 1.0, 1_000_000.0).expect("valid axis");
    axis.grid_points(None).expect("scale computes");

    c.bench_function("log_grid_points", |b| {
        b.iter(|| {
            let _ = axis.grid_points(black_box(Some(0.0))).expect("points");
        })
    });
}

fn bench_grid_subdivisions(c: &mut Criterion) {
    let options = AxisOptions {
        min_space: 40.0,
        ..AxisOptions::default()
    };
    let mut axis =
        LinearAxis::with_options(500.0, 0.0, 100.0, options).expect("valid axis");
    axis.grid_points(None).expect("scale computes");

    c.bench_function("grid_subdivisions", |b| {
        b.iter(|| {
            let _ = axis
                .grid_subdivisions(black_box(10.0), 0.0, 0.0, None)
                .expect("subdivisions");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_computation,
    bench_linear_grid_points,
    bench_linear_position_round_trip,
    bench_log_grid_points,
    bench_grid_subdivisions
);
criterion_main!(benches);
