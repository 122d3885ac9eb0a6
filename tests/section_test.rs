//! Integration tests for collection averages and section grids.
//!
//! Builds a synthetic cruise of CTD stations and runs the full
//! aggregate -> section -> bottom profile workflow.

use cast_rs::analysis::{
    Aggregator, ProjectionMode, SectionError, SectionInterpolator, TrackProjector,
    deepest_valid_level,
};
use cast_rs::bathymetry::Bathymetry;
use cast_rs::cast::{Cast, CastCollection, CastKind};
use cast_rs::geometry::{Coordinates, Geodesic, Planar, TrackMetric};
use cast_rs::seawater::Eos80;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pressure() -> Vec<f64> {
    (0..500).map(|i| 1.0 + 2.0 * i as f64).collect()
}

/// Station `i` of a synthetic cruise; deeper stations have more valid levels.
fn ctd(i: usize) -> Cast {
    let p = pressure();
    let valid = 200 + 60 * i;
    let mask = |k: usize, v: f64| if k < valid { v } else { f64::NAN };

    let temp = p
        .iter()
        .enumerate()
        .map(|(k, p)| {
            let t = 10.0 * (-0.008 * p).exp() - 15.0 * (-0.005 * (p + 100.0)).exp() + 2.0;
            mask(k, t + 0.1 * i as f64)
        })
        .collect();
    let sal = p
        .iter()
        .enumerate()
        .map(|(k, p)| mask(k, -14.0 * (-0.01 * p).exp() + 34.0))
        .collect();

    let mut cast = Cast::builder("pres", p)
        .values("temp", temp)
        .values("sal", sal)
        .values("botdepth", vec![1000.0; 500])
        .kind(CastKind::Ctd)
        .coordinates(Coordinates::new(-40.0 + 0.25 * i as f64, 64.0 + 0.1 * i as f64))
        .build()
        .unwrap();
    cast.add_density(&Eos80, "sal", "temp", "rho").unwrap();
    cast
}

fn cruise() -> CastCollection {
    (0..5).map(ctd).collect()
}

#[test]
fn test_aggregate_cruise() {
    init_logger();
    let cc = cruise();
    let mean = Aggregator::new().aggregate(&cc).unwrap();

    let mut names: Vec<&str> = mean.field_names().collect();
    names.sort();
    assert_eq!(names, vec!["rho", "sal", "temp"]);
    assert_eq!(mean.grid(), cc[0].grid());
    assert_eq!(mean.properties.coordinates, None);

    // Level 0: all five stations valid, mean offset 0.2
    let t0 = mean.field("temp").unwrap()[0].unwrap();
    let expected = 10.0 * (-0.008f64).exp() - 15.0 * (-0.005f64 * 101.0).exp() + 2.0 + 0.2;
    assert!((t0 - expected).abs() < 1e-10);

    // Level 400: only the deepest station reaches it
    let t400 = mean.field("temp").unwrap()[400].unwrap();
    assert!((t400 - cc[4].field("temp").unwrap()[400].unwrap()).abs() < 1e-10);

    // Beyond every station: missing
    assert_eq!(mean.field("temp").unwrap()[499], None);
}

#[test]
fn test_aggregate_grid_mismatch() {
    let mut casts = cruise().into_casts();
    casts.push(
        Cast::builder("pres", vec![1.0, 3.0, 5.0])
            .values("temp", vec![1.0, 2.0, 3.0])
            .build()
            .unwrap(),
    );
    let cc = CastCollection::new(casts);

    assert_eq!(
        Aggregator::new().aggregate(&cc),
        Err(SectionError::GridMismatch(5))
    );
}

#[test]
fn test_section_grid_shape_and_hull() {
    let cc = cruise();
    let section = SectionInterpolator::new(&Geodesic, 30)
        .interpolate(&cc, "rho")
        .unwrap();

    assert_eq!(section.shape(), (30, 500));
    assert_eq!(section.values.len(), 30);
    assert!(section.values.iter().all(|col| col.len() == 500));

    let stations = Geodesic.cumulative_length(&cc.track().unwrap());
    assert_eq!(section.station_distances, stations);
    assert_eq!(section.distances[0], 0.0);
    assert_eq!(*section.distances.last().unwrap(), *stations.last().unwrap());

    // Surface is covered everywhere; the deepest levels lie outside the hull
    assert!((0..30).all(|i| section.get(i, 0).is_some()));
    assert!((0..30).all(|i| section.get(i, 499).is_none()));

    // Deepest station reaches level index 439 (p = 879 dbar)
    assert_eq!(section.deepest_level, Some(879.0));
    assert_eq!(deepest_valid_level(&cc, "rho"), Some(879.0));
}

#[test]
fn test_section_values_bounded_by_observations() {
    let cc = cruise();
    let section = SectionInterpolator::new(&Planar, 12)
        .interpolate(&cc, "temp")
        .unwrap();

    let observed: Vec<f64> = cc
        .iter()
        .flat_map(|c| c.field("temp").unwrap().iter().flatten().copied())
        .collect();
    let lo = observed.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = observed.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    for v in section.values.iter().flatten().flatten() {
        assert!(*v >= lo - 1e-9 && *v <= hi + 1e-9);
    }
}

#[test]
fn test_section_is_deterministic() {
    let cc = cruise();
    let interpolator = SectionInterpolator::new(&Planar, 8);
    assert_eq!(
        interpolator.interpolate(&cc, "sal").unwrap(),
        interpolator.interpolate(&cc, "sal").unwrap()
    );
}

#[test]
fn test_section_with_bottom_profile() {
    init_logger();
    let cc = cruise();
    let track = cc.track().unwrap();
    let bathy = Bathymetry::from_samples(track.windows(2).flat_map(|w| {
        let mid = Coordinates::new((w[0].lon + w[1].lon) / 2.0, (w[0].lat + w[1].lat) / 2.0);
        [(w[0], 900.0), (mid, 1100.0)]
    }))
    .unwrap();

    let section = SectionInterpolator::new(&Geodesic, 20)
        .interpolate(&cc, "temp")
        .unwrap();
    let bottom = TrackProjector::new(&Geodesic, 100.0)
        .project(&bathy, &ProjectionMode::Projected(track))
        .unwrap();

    // Both live on the same along-track axis
    let end = *section.distances.last().unwrap();
    assert!(bottom.distances().iter().all(|&d| d >= 0.0 && d <= end + 1e-6));
    assert_eq!(bottom.max_depth(), Some(1100.0));
}

fn cross(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

/// Counter-clockwise convex hull (monotone chain).
fn convex_hull(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
    let mut hull: Vec<[f64; 2]> = Vec::new();
    for pass in [sorted.clone(), sorted.into_iter().rev().collect()] {
        let base = hull.len();
        for p in pass {
            while hull.len() >= base + 2
                && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
            {
                hull.pop();
            }
            hull.push(p);
        }
        hull.pop();
    }
    hull
}

#[test]
fn test_staircase_section_fills_hull() {
    init_logger();
    let bottoms = [57usize, 82, 181, 120, 64, 199, 143, 95, 170];
    let levels: Vec<f64> = (0..200).map(|k| 5.0 * k as f64).collect();

    let cc: CastCollection = bottoms
        .iter()
        .enumerate()
        .map(|(s, &n)| {
            let temp = levels
                .iter()
                .enumerate()
                .map(|(k, p)| if k < n { 4.0 - 0.002 * p + 0.1 * s as f64 } else { f64::NAN })
                .collect();
            Cast::builder("pres", levels.clone())
                .values("temp", temp)
                .coordinates(Coordinates::new(0.02 * s as f64, 70.0))
                .build()
                .unwrap()
        })
        .collect();

    let section = SectionInterpolator::new(&Planar, 40)
        .interpolate(&cc, "temp")
        .unwrap();

    let grid = &levels;
    let observed: Vec<[f64; 2]> = section
        .station_distances
        .iter()
        .zip(bottoms)
        .flat_map(move |(&d, n)| grid[..n].iter().map(move |&p| [d, p]))
        .collect();
    let hull = convex_hull(&observed);

    let mut interior = 0;
    for (i, &d) in section.distances.iter().enumerate() {
        for (j, &p) in section.levels.iter().enumerate() {
            let inside = (0..hull.len()).all(|k| {
                let (a, b) = (hull[k], hull[(k + 1) % hull.len()]);
                cross(a, b, [d, p]) / ((b[0] - a[0]).hypot(b[1] - a[1])) >= 1e-3
            });
            if inside {
                interior += 1;
                assert!(section.get(i, j).is_some(), "missing value at ({}, {})", d, p);
            }
        }
    }
    assert!(interior > 6000);
}
