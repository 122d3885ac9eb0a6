//! Benchmarks for along-track bathymetry projection.
//!
//! Run with: `cargo bench --bench projection_bench`
//!
//! Compares planar and geodesic metrics for growing survey sizes.

use std::hint::black_box;

use cast_rs::analysis::{ProjectionMode, TrackProjector};
use cast_rs::bathymetry::Bathymetry;
use cast_rs::geometry::{Coordinates, Geodesic, Planar, TrackMetric};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Zig-zag cruise track with `n` stations.
fn generate_track(n: usize) -> Vec<Coordinates> {
    (0..n)
        .map(|i| {
            let lat = 65.0 + 0.05 * i as f64;
            let lon = -30.0 + if i % 2 == 0 { 0.0 } else { 0.08 };
            Coordinates::new(lon, lat)
        })
        .collect()
}

/// Soundings scattered around the track.
fn generate_survey(n: usize) -> Bathymetry {
    Bathymetry::from_samples((0..n).map(|i| {
        let phase = i as f64 * 0.37;
        let lat = 65.0 + 0.95 * i as f64 / n as f64;
        let lon = -30.0 + 0.04 + 0.05 * phase.sin();
        (Coordinates::new(lon, lat), 500.0 + 200.0 * phase.cos().abs())
    }))
    .expect("valid survey")
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let track = generate_track(20);
    let mode = ProjectionMode::Projected(track);

    for &n in &[100usize, 1_000, 10_000] {
        let survey = generate_survey(n);

        group.bench_with_input(BenchmarkId::new("planar", n), &survey, |b, survey| {
            let projector = TrackProjector::new(&Planar, 0.05);
            b.iter(|| projector.project(black_box(survey), &mode))
        });

        group.bench_with_input(BenchmarkId::new("geodesic", n), &survey, |b, survey| {
            let projector = TrackProjector::new(&Geodesic, 3000.0);
            b.iter(|| projector.project(black_box(survey), &mode))
        });
    }

    group.finish();
}

fn bench_direct(c: &mut Criterion) {
    let survey = generate_survey(10_000);
    c.bench_function("direct_geodesic_10000", |b| {
        let projector = TrackProjector::new(&Geodesic, 0.0);
        b.iter(|| projector.project(black_box(&survey), &ProjectionMode::Direct))
    });
}

fn bench_bathymetry_at_point(c: &mut Criterion) {
    let survey = generate_survey(1_000);
    let stations = generate_track(20);
    let metrics: [(&str, &dyn TrackMetric); 2] = [("planar", &Planar), ("geodesic", &Geodesic)];

    let mut group = c.benchmark_group("at_point");
    for (name, metric) in metrics {
        group.bench_function(name, |b| {
            b.iter(|| {
                stations
                    .iter()
                    .filter_map(|&p| survey.at_point(black_box(p), metric))
                    .sum::<f64>()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_projection, bench_direct, bench_bathymetry_at_point);
criterion_main!(benches);
