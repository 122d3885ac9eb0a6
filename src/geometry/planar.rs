//! Euclidean geometry on raw coordinate values.

use geo::{Closest, ClosestPoint, EuclideanDistance, Line};

use super::{Coordinates, TrackMetric};

/// Planar metric: straight-line distances in coordinate units.
///
/// Suitable for small regions, and for reproducing thresholds given in
/// degrees (e.g. "within 0.01° of the cruise line").
#[derive(Clone, Copy, Debug, Default)]
pub struct Planar;

impl TrackMetric for Planar {
    #[inline]
    fn distance(&self, a: Coordinates, b: Coordinates) -> f64 {
        a.to_point().euclidean_distance(&b.to_point())
    }

    fn nearest_point_on_segment(
        &self,
        a: Coordinates,
        b: Coordinates,
        p: Coordinates,
    ) -> Coordinates {
        if a == b {
            return a;
        }
        let line = Line::new(a.to_point(), b.to_point());
        match line.closest_point(&p.to_point()) {
            Closest::Intersection(q) | Closest::SinglePoint(q) => Coordinates::from_point(q),
            Closest::Indeterminate => a,
        }
    }
}
