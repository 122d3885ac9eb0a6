//! Integration tests for attaching bathymetry to cast collections.
//!
//! Uses a ship-track survey north of Svalbard and three stations along it.

use cast_rs::bathymetry::Bathymetry;
use cast_rs::cast::{Cast, CastCollection};
use cast_rs::geometry::{Coordinates, Geodesic, Planar};

const LON: [f64; 13] = [
    -17.41933333, -17.42628333, -17.42573333, -17.4254, -17.42581667, -17.42583333, -17.4269,
    -17.4437, -17.44126667, -17.44416667, -17.44673333, -17.46633333, -17.48418333,
];
const LAT: [f64; 13] = [
    80.07101667, 80.0878, 80.09245, 80.10168333, 80.10895, 80.11108333, 80.11398333, 80.12305,
    80.12928333, 80.1431, 80.1534, 80.16636667, 80.16741667,
];
const DEPTH: [f64; 13] = [
    102.0, 95.0, 90.0, 100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 170.0, 160.0, 140.0, 130.0,
];

/// Published depths for the three stations of this survey.
const REFERENCE: [f64; 3] = [92.93171145156435, 123.1639348135739, 150.2982311721252];

/// Nearest-segment interpolation on the sphere at the same stations.
const NEAREST_SEGMENT: [f64; 3] = [92.61167178315539, 123.15458158664082, 150.24806262841338];

fn survey() -> Bathymetry {
    Bathymetry::from_samples(
        LON.iter()
            .zip(LAT.iter())
            .zip(DEPTH.iter())
            .map(|((&lon, &lat), &d)| (Coordinates::new(lon, lat), d)),
    )
    .unwrap()
}

fn station(lon: f64, lat: f64) -> Cast {
    let p: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let t: Vec<f64> = p.iter().map(|p| 1.0 - 0.01 * p).collect();
    let s: Vec<f64> = p.iter().map(|p| 33.0 + 0.01 * p).collect();
    Cast::builder("P", p)
        .values("T", t)
        .values("S", s)
        .coordinates(Coordinates::new(lon, lat))
        .build()
        .unwrap()
}

fn stations() -> CastCollection {
    CastCollection::new(vec![
        station(-17.42, 80.09),
        station(-17.426, 80.112),
        station(-17.45, 80.16),
    ])
}

#[test]
fn test_add_to_cast_collection() {
    let mut cc = stations();
    let updated = cc.add_bathymetry(&survey(), &Geodesic);
    assert_eq!(updated, 3);

    for ((cast, expected), published) in cc.iter().zip(NEAREST_SEGMENT).zip(REFERENCE) {
        let depth = cast.properties.depth.unwrap();
        assert!(
            ((depth - expected) / expected).abs() < 1e-6,
            "depth {} vs {}",
            depth,
            expected
        );
        // The published depths weight the soundings differently; they agree to 0.4%
        assert!(((depth - published) / published).abs() < 4e-3);
    }
}

#[test]
fn test_attached_depths_within_survey_range() {
    let bathy = survey();
    let (lo, hi) = (90.0, bathy.max_depth().unwrap());

    for metric in [&Planar as &dyn cast_rs::TrackMetric, &Geodesic] {
        let mut cc = stations();
        cc.add_bathymetry(&bathy, metric);
        for cast in &cc {
            let d = cast.properties.depth.unwrap();
            assert!(d >= lo && d <= hi);
        }
    }
}

#[test]
fn test_depth_at_survey_vertices() {
    let bathy = survey();
    for (&p, &d) in bathy.positions().iter().zip(bathy.depths()) {
        let at = bathy.at_point(p, &Geodesic).unwrap();
        assert!((at - d).abs() < 1e-6);
    }
}
