//! Scattered seafloor depth samples.
//!
//! A [`Bathymetry`] survey holds depth soundings at geographic positions,
//! typically logged along a ship track independently of the cast stations.
//! Depth is positive downward, in meters below the surface.
//!
//! Two derived views are provided here:
//! - [`Bathymetry::cumulative_length`]: distance along the survey line, in
//!   sample order (used by the direct projection mode)
//! - [`Bathymetry::at_point`]: depth interpolated at an arbitrary position
//!
//! # Example
//!
//! ```
//! use cast_rs::bathymetry::Bathymetry;
//! use cast_rs::geometry::{Coordinates, Planar};
//!
//! let bathy = Bathymetry::new(
//!     vec![Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0)],
//!     vec![100.0, 140.0],
//! ).unwrap();
//!
//! let depth = bathy.at_point(Coordinates::new(0.25, 0.1), &Planar).unwrap();
//! assert!((depth - 110.0).abs() < 1e-10);
//! ```

use thiserror::Error;

use crate::geometry::{Coordinates, TrackMetric};

/// Error type for bathymetry construction.
#[derive(Debug, Error, PartialEq)]
pub enum BathymetryError {
    /// Positions and depths differ in length
    #[error("{positions} positions but {depths} depths")]
    LengthMismatch {
        /// Number of positions
        positions: usize,
        /// Number of depths
        depths: usize,
    },

    /// Depth is not a positive finite value
    #[error("Invalid depth {value} at sample {index}")]
    InvalidDepth {
        /// Sample index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Position outside the valid (lon, lat) range
    #[error("Invalid coordinates {value} at sample {index}")]
    InvalidCoordinates {
        /// Sample index
        index: usize,
        /// Offending position
        value: Coordinates,
    },
}

/// Seafloor depth samples at scattered positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Bathymetry {
    positions: Vec<Coordinates>,
    depths: Vec<f64>,
}

impl Bathymetry {
    /// Create a survey from parallel position and depth arrays.
    pub fn new(positions: Vec<Coordinates>, depths: Vec<f64>) -> Result<Self, BathymetryError> {
        if positions.len() != depths.len() {
            return Err(BathymetryError::LengthMismatch {
                positions: positions.len(),
                depths: depths.len(),
            });
        }
        if let Some((index, &value)) = depths
            .iter()
            .enumerate()
            .find(|(_, d)| !d.is_finite() || **d <= 0.0)
        {
            return Err(BathymetryError::InvalidDepth { index, value });
        }
        if let Some((index, &value)) = positions.iter().enumerate().find(|(_, p)| !p.is_valid()) {
            return Err(BathymetryError::InvalidCoordinates { index, value });
        }

        Ok(Self { positions, depths })
    }

    /// Create a survey from (position, depth) pairs.
    pub fn from_samples<I>(samples: I) -> Result<Self, BathymetryError>
    where
        I: IntoIterator<Item = (Coordinates, f64)>,
    {
        let (positions, depths) = samples.into_iter().unzip();
        Self::new(positions, depths)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Check if the survey has no samples.
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Sample positions in survey order.
    pub fn positions(&self) -> &[Coordinates] {
        &self.positions
    }

    /// Sample depths in survey order.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Iterate over (position, depth) pairs.
    pub fn samples(&self) -> impl Iterator<Item = (Coordinates, f64)> + '_ {
        self.positions.iter().copied().zip(self.depths.iter().copied())
    }

    /// Deepest sample.
    pub fn max_depth(&self) -> Option<f64> {
        self.depths.iter().copied().reduce(f64::max)
    }

    /// Cumulative distance along the survey line, in sample order.
    pub fn cumulative_length(&self, metric: &dyn TrackMetric) -> Vec<f64> {
        metric.cumulative_length(&self.positions)
    }

    /// Depth at `point`, interpolated along the nearest survey-line segment.
    ///
    /// The point is projected onto the closest segment between consecutive
    /// samples, and the two endpoint depths are weighted by the distance of
    /// the projection from the opposite endpoint. Returns `None` for an empty
    /// survey; a single-sample survey returns that sample's depth.
    pub fn at_point(&self, point: Coordinates, metric: &dyn TrackMetric) -> Option<f64> {
        match self.len() {
            0 => return None,
            1 => return Some(self.depths[0]),
            _ => {}
        }

        let mut best: Option<(usize, Coordinates, f64)> = None;
        for (i, w) in self.positions.windows(2).enumerate() {
            let q = metric.nearest_point_on_segment(w[0], w[1], point);
            let d = metric.distance(q, point);
            if best.map_or(true, |(_, _, best_d)| d < best_d) {
                best = Some((i, q, d));
            }
        }

        let (i, q, _) = best?;
        let (a, b) = (self.positions[i], self.positions[i + 1]);
        let (da, db) = (metric.distance(q, a), metric.distance(q, b));
        let total = da + db;
        if total <= 0.0 {
            return Some(self.depths[i]);
        }
        Some((da * self.depths[i + 1] + db * self.depths[i]) / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Planar;

    fn line() -> Bathymetry {
        Bathymetry::new(
            vec![
                Coordinates::new(0.0, 0.0),
                Coordinates::new(1.0, 0.0),
                Coordinates::new(1.0, 1.0),
            ],
            vec![100.0, 200.0, 300.0],
        )
        .unwrap()
    }

    #[test]
    fn test_length_mismatch() {
        let result = Bathymetry::new(vec![Coordinates::new(0.0, 0.0)], vec![1.0, 2.0]);
        assert_eq!(
            result.unwrap_err(),
            BathymetryError::LengthMismatch {
                positions: 1,
                depths: 2
            }
        );
    }

    #[test]
    fn test_negative_depth_rejected() {
        let result = Bathymetry::new(
            vec![Coordinates::new(0.0, 0.0), Coordinates::new(1.0, 0.0)],
            vec![10.0, -5.0],
        );
        assert!(matches!(
            result,
            Err(BathymetryError::InvalidDepth { index: 1, .. })
        ));
    }

    #[test]
    fn test_cumulative_length() {
        assert_eq!(line().cumulative_length(&Planar), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_max_depth() {
        assert_eq!(line().max_depth(), Some(300.0));
    }

    #[test]
    fn test_at_point_picks_nearest_segment() {
        let bathy = line();

        // Near the second segment, a quarter of the way up
        let d = bathy.at_point(Coordinates::new(1.2, 0.25), &Planar).unwrap();
        assert!((d - 225.0).abs() < 1e-10);

        // Beyond the start clamps onto the first sample
        let d = bathy.at_point(Coordinates::new(-1.0, 0.0), &Planar).unwrap();
        assert!((d - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_at_point_degenerate_surveys() {
        let empty = Bathymetry::new(vec![], vec![]).unwrap();
        assert_eq!(empty.at_point(Coordinates::new(0.0, 0.0), &Planar), None);

        let single = Bathymetry::new(vec![Coordinates::new(0.0, 0.0)], vec![42.0]).unwrap();
        assert_eq!(single.at_point(Coordinates::new(5.0, 5.0), &Planar), Some(42.0));
    }
}
