//! Geographic position type.

use std::fmt;

use geo::Point;
use serde::{Deserialize, Serialize};

/// A (longitude, latitude) position in degrees.
///
/// Serialized as a two-element array `[lon, lat]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coordinates {
    /// Longitude (degrees East)
    pub lon: f64,
    /// Latitude (degrees North)
    pub lat: f64,
}

impl Coordinates {
    /// Create a new position.
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Check that the position is finite, with lat in [-90, 90] and lon in [-180, 360].
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=360.0).contains(&self.lon)
    }

    /// Convert to a `geo` point (x = lon, y = lat).
    #[inline]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Build from a `geo` point.
    #[inline]
    pub fn from_point(p: Point<f64>) -> Self {
        Self::new(p.x(), p.y())
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl From<Coordinates> for (f64, f64) {
    fn from(c: Coordinates) -> Self {
        (c.lon, c.lat)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}°E, {:.5}°N)", self.lon, self.lat)
    }
}
