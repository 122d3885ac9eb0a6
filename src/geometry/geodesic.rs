//! Great-circle geometry on a spherical Earth.
//!
//! Distances use the haversine formula with the mean Earth radius from `geo`.
//! Nearest points are found by projecting onto the great circle through the
//! segment endpoints in 3D unit-vector space, then clamping to the arc.

use geo::HaversineDistance;

use super::{Coordinates, TrackMetric};

/// Geodesic metric: great-circle distances in meters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Geodesic;

type Vec3 = [f64; 3];

#[inline]
fn to_unit(c: Coordinates) -> Vec3 {
    let (lon, lat) = (c.lon.to_radians(), c.lat.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

#[inline]
fn from_unit(v: Vec3) -> Coordinates {
    let lat = v[2].clamp(-1.0, 1.0).asin();
    let lon = v[1].atan2(v[0]);
    Coordinates::new(lon.to_degrees(), lat.to_degrees())
}

#[inline]
fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

impl TrackMetric for Geodesic {
    #[inline]
    fn distance(&self, a: Coordinates, b: Coordinates) -> f64 {
        a.to_point().haversine_distance(&b.to_point())
    }

    fn nearest_point_on_segment(
        &self,
        a: Coordinates,
        b: Coordinates,
        p: Coordinates,
    ) -> Coordinates {
        let closer_endpoint = || {
            if self.distance(a, p) <= self.distance(b, p) {
                a
            } else {
                b
            }
        };

        let (ua, ub, up) = (to_unit(a), to_unit(b), to_unit(p));
        let n = cross(ua, ub);
        let n_len = norm(n);
        // Coincident or antipodal endpoints do not define a great circle
        if n_len < 1e-15 {
            return closer_endpoint();
        }
        let n = [n[0] / n_len, n[1] / n_len, n[2] / n_len];

        let off = dot(up, n);
        let q = [up[0] - off * n[0], up[1] - off * n[1], up[2] - off * n[2]];
        let q_len = norm(q);
        if q_len < 1e-15 {
            return closer_endpoint();
        }
        let q = [q[0] / q_len, q[1] / q_len, q[2] / q_len];

        // q lies on the minor arc a-b iff it is on the positive side of both sub-arcs
        if dot(cross(ua, q), n) >= 0.0 && dot(cross(q, ub), n) >= 0.0 {
            from_unit(q)
        } else {
            closer_endpoint()
        }
    }
}
