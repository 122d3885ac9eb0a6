//! Geometric primitives for cruise tracks and bathymetry lines.
//!
//! All along-track computations go through the [`TrackMetric`] trait so the
//! same projection and section code works on raw coordinate units or on
//! great-circle distances in meters.
//!
//! - [`Planar`]: Euclidean geometry directly on (lon, lat) values. Distances are
//!   in coordinate units (degrees for geographic positions).
//! - [`Geodesic`]: Spherical geometry on WGS84 positions. Distances are in meters.
//!
//! # Example
//!
//! ```
//! use cast_rs::geometry::{Coordinates, Geodesic, Planar, TrackMetric};
//!
//! let track = [
//!     Coordinates::new(0.0, 0.0),
//!     Coordinates::new(3.0, 4.0),
//!     Coordinates::new(3.0, 5.0),
//! ];
//!
//! let cum = Planar.cumulative_length(&track);
//! assert_eq!(cum, vec![0.0, 5.0, 6.0]);
//!
//! // One degree of latitude is about 111 km
//! let d = Geodesic.distance(Coordinates::new(0.0, 60.0), Coordinates::new(0.0, 61.0));
//! assert!((d - 111_195.0).abs() < 100.0);
//! ```

mod coordinates;
mod geodesic;
mod planar;

pub use coordinates::Coordinates;
pub use geodesic::Geodesic;
pub use planar::Planar;

use serde::{Deserialize, Serialize};

/// Distance and projection operations along piecewise-linear paths.
pub trait TrackMetric: Send + Sync {
    /// Distance between two positions.
    fn distance(&self, a: Coordinates, b: Coordinates) -> f64;

    /// Point on segment `a`-`b` nearest to `p`, clamped to the segment extent.
    fn nearest_point_on_segment(&self, a: Coordinates, b: Coordinates, p: Coordinates)
        -> Coordinates;

    /// Whether `p` lies within `threshold` of segment `a`-`b` (inclusive).
    fn within_distance(
        &self,
        a: Coordinates,
        b: Coordinates,
        p: Coordinates,
        threshold: f64,
    ) -> bool {
        let q = self.nearest_point_on_segment(a, b, p);
        self.distance(q, p) <= threshold
    }

    /// Cumulative path length at each vertex, starting at 0.
    ///
    /// Returns an empty vector for an empty path.
    fn cumulative_length(&self, points: &[Coordinates]) -> Vec<f64> {
        let mut out = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, &p) in points.iter().enumerate() {
            if i > 0 {
                total += self.distance(points[i - 1], p);
            }
            out.push(total);
        }
        out
    }
}

/// Selectable metric, used by configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Euclidean geometry in coordinate units
    Planar,
    /// Great-circle geometry in meters
    #[default]
    Geodesic,
}

impl MetricKind {
    /// Get the metric implementation for this kind.
    pub fn metric(self) -> &'static dyn TrackMetric {
        match self {
            MetricKind::Planar => &Planar,
            MetricKind::Geodesic => &Geodesic,
        }
    }
}
