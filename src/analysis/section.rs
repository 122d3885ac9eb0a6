//! Regular (distance x level) section grids.
//!
//! Observations of one field from every cast are placed at
//! (along-track distance of the station, grid level), triangulated, and
//! linearly interpolated onto an evenly spaced distance axis crossed with the
//! first cast's vertical grid. Grid points outside the convex hull of the
//! observations are missing.
//!
//! # Example
//!
//! ```
//! use cast_rs::analysis::SectionInterpolator;
//! use cast_rs::cast::{Cast, CastCollection};
//! use cast_rs::geometry::{Coordinates, Planar};
//!
//! let casts: CastCollection = (0..3)
//!     .map(|i| {
//!         Cast::builder("pres", vec![0.0, 50.0, 100.0])
//!             .values("temp", vec![10.0, 8.0, 6.0])
//!             .coordinates(Coordinates::new(i as f64, 0.0))
//!             .build()
//!             .unwrap()
//!     })
//!     .collect();
//!
//! let section = SectionInterpolator::new(&Planar, 5)
//!     .interpolate(&casts, "temp")
//!     .unwrap();
//!
//! assert_eq!(section.shape(), (5, 3));
//! assert_eq!(section.distances, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
//! assert!((section.values[1][1].unwrap() - 8.0).abs() < 1e-10);
//! ```

use log::debug;

use super::SectionError;
use super::triangulation::Triangulation;
use crate::cast::CastCollection;
use crate::geometry::TrackMetric;

/// A field resampled onto a regular section grid.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionGrid {
    /// Along-track distance axis, evenly spaced
    pub distances: Vec<f64>,
    /// Vertical axis (the first cast's grid)
    pub levels: Vec<f64>,
    /// Interpolated values, indexed `[distance][level]`
    pub values: Vec<Vec<Option<f64>>>,
    /// Along-track distance of every station, in collection order
    pub station_distances: Vec<f64>,
    /// Largest level at which any cast has a valid value
    pub deepest_level: Option<f64>,
}

impl SectionGrid {
    /// `(distances, levels)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.distances.len(), self.levels.len())
    }

    /// Value at distance index `i`, level index `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i)?.get(j).copied().flatten()
    }

    /// Fraction of grid points with a value.
    pub fn coverage(&self) -> f64 {
        let total = self.distances.len() * self.levels.len();
        if total == 0 {
            return 0.0;
        }
        let filled = self.values.iter().flatten().filter(|v| v.is_some()).count();
        filled as f64 / total as f64
    }
}

/// Deepest grid level with a valid `field` value over all casts.
pub fn deepest_valid_level(group: &CastCollection, field: &str) -> Option<f64> {
    group
        .iter()
        .filter_map(|c| c.deepest_valid_level(field))
        .reduce(f64::max)
}

/// Grids a measured field along the cruise track.
pub struct SectionInterpolator<'a> {
    metric: &'a dyn TrackMetric,
    track_resolution: usize,
}

impl<'a> SectionInterpolator<'a> {
    /// Interpolator producing `track_resolution` columns along the track.
    pub fn new(metric: &'a dyn TrackMetric, track_resolution: usize) -> Self {
        Self {
            metric,
            track_resolution,
        }
    }

    /// Number of distance columns.
    pub fn track_resolution(&self) -> usize {
        self.track_resolution
    }

    /// Resample `field` onto the section grid.
    ///
    /// # Errors
    ///
    /// - [`SectionError::InvalidResolution`] if the resolution is zero
    /// - [`SectionError::EmptyGroup`] for an empty collection
    /// - [`SectionError::MissingCoordinates`] for a cast without a position
    /// - [`SectionError::UnknownField`] if any cast lacks `field`
    /// - [`SectionError::InsufficientData`] for fewer than three observations
    ///   or observations on a single line
    pub fn interpolate(
        &self,
        group: &CastCollection,
        field: &str,
    ) -> Result<SectionGrid, SectionError> {
        if self.track_resolution == 0 {
            return Err(SectionError::InvalidResolution);
        }
        let first = group.get(0).ok_or(SectionError::EmptyGroup)?;
        let track = group.track()?;
        let columns = group.as_array(field)?;
        let station_distances = self.metric.cumulative_length(&track);

        let mut points = Vec::new();
        let mut values = Vec::new();
        for ((cast, column), &distance) in group.iter().zip(&columns).zip(&station_distances) {
            for (&level, v) in cast.grid().iter().zip(column) {
                if let Some(v) = v {
                    points.push([distance, level]);
                    values.push(*v);
                }
            }
        }

        let n_obs = points.len();
        if n_obs < 3 {
            return Err(SectionError::InsufficientData(n_obs));
        }
        let triangulation =
            Triangulation::new(&points).ok_or(SectionError::InsufficientData(n_obs))?;

        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[0]), hi.max(p[0]))
            });
        let distances = linspace(lo, hi, self.track_resolution);
        let levels = first.grid().to_vec();
        let grid = triangulation.interpolate_grid(&values, &distances, &levels);

        debug!(
            "gridded {} observations of '{}' onto {}x{} section ({} triangles)",
            n_obs,
            field,
            distances.len(),
            levels.len(),
            triangulation.n_triangles()
        );

        Ok(SectionGrid {
            distances,
            levels,
            values: grid,
            station_distances,
            deepest_level: deepest_valid_level(group, field),
        })
    }
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { hi } else { lo + step * i as f64 })
        .collect()
}
