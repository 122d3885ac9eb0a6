//! Along-track bathymetry profiles.
//!
//! A [`TrackProjector`] turns scattered depth soundings into a depth series
//! indexed by distance along a cruise track. Two modes are supported:
//!
//! - [`ProjectionMode::Direct`]: the survey is itself the track; distances are
//!   the cumulative length of the survey positions in sample order.
//! - [`ProjectionMode::Projected`]: each sample within `max_distance` of a
//!   track segment is projected onto that segment, and its along-track
//!   distance is measured from the first track vertex.
//!
//! Distances are in the units of the chosen [`TrackMetric`].

use log::debug;

use super::SectionError;
use crate::bathymetry::Bathymetry;
use crate::geometry::{Coordinates, TrackMetric};

/// How survey samples are placed along the track.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectionMode {
    /// Use the survey positions as the track
    Direct,
    /// Project samples onto the given track (typically the cast stations)
    Projected(Vec<Coordinates>),
}

/// Depth at a given along-track distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlongTrackPoint {
    /// Distance from the first track vertex
    pub distance: f64,
    /// Seafloor depth (m)
    pub depth: f64,
}

/// Depth series sorted ascending by along-track distance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlongTrackDepth {
    points: Vec<AlongTrackPoint>,
}

impl AlongTrackDepth {
    /// Sort `points` by distance. The sort is stable, so equal distances keep
    /// their insertion order.
    pub fn new(mut points: Vec<AlongTrackPoint>) -> Self {
        points.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Self { points }
    }

    /// Points in ascending distance order.
    pub fn points(&self) -> &[AlongTrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distances in ascending order.
    pub fn distances(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.distance).collect()
    }

    /// Depths in distance order.
    pub fn depths(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.depth).collect()
    }

    /// Deepest point of the series.
    pub fn max_depth(&self) -> Option<f64> {
        self.points.iter().map(|p| p.depth).reduce(f64::max)
    }

    /// Depth at `distance` by linear interpolation.
    ///
    /// Returns `None` outside the covered distance range or for an empty series.
    pub fn depth_at(&self, distance: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if distance < first.distance || distance > last.distance {
            return None;
        }

        // First point at or beyond `distance`
        let i = self.points.partition_point(|p| p.distance < distance);
        let hi = self.points[i];
        if i == 0 || hi.distance == distance {
            return Some(hi.depth);
        }
        let lo = self.points[i - 1];
        let t = (distance - lo.distance) / (hi.distance - lo.distance);
        Some(lo.depth + t * (hi.depth - lo.depth))
    }
}

/// Projects bathymetry samples onto a cruise track.
pub struct TrackProjector<'a> {
    metric: &'a dyn TrackMetric,
    max_distance: f64,
}

impl<'a> TrackProjector<'a> {
    /// Projector matching samples within `max_distance` of a track segment.
    pub fn new(metric: &'a dyn TrackMetric, max_distance: f64) -> Self {
        Self {
            metric,
            max_distance,
        }
    }

    /// Matching threshold in metric units.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Build the along-track depth series for `bathymetry`.
    ///
    /// In projected mode a sample close to several segments is recorded once
    /// per segment, and a sample close to none is dropped.
    ///
    /// # Errors
    ///
    /// [`SectionError::InsufficientTrack`] if a projection track has fewer
    /// than two vertices.
    pub fn project(
        &self,
        bathymetry: &Bathymetry,
        mode: &ProjectionMode,
    ) -> Result<AlongTrackDepth, SectionError> {
        match mode {
            ProjectionMode::Direct => Ok(self.direct(bathymetry)),
            ProjectionMode::Projected(track) => self.projected(bathymetry, track),
        }
    }

    fn direct(&self, bathymetry: &Bathymetry) -> AlongTrackDepth {
        let points = bathymetry
            .cumulative_length(self.metric)
            .into_iter()
            .zip(bathymetry.depths())
            .map(|(distance, &depth)| AlongTrackPoint { distance, depth })
            .collect();
        AlongTrackDepth::new(points)
    }

    fn projected(
        &self,
        bathymetry: &Bathymetry,
        track: &[Coordinates],
    ) -> Result<AlongTrackDepth, SectionError> {
        if track.len() < 2 {
            return Err(SectionError::InsufficientTrack(track.len()));
        }

        let mut points = Vec::new();
        let mut matched = vec![false; bathymetry.len()];
        let mut offset = 0.0;
        for segment in track.windows(2) {
            let (a, b) = (segment[0], segment[1]);
            for (i, (position, depth)) in bathymetry.samples().enumerate() {
                if !self
                    .metric
                    .within_distance(a, b, position, self.max_distance)
                {
                    continue;
                }
                let projected = self.metric.nearest_point_on_segment(a, b, position);
                points.push(AlongTrackPoint {
                    distance: offset + self.metric.distance(a, projected),
                    depth,
                });
                matched[i] = true;
            }
            offset += self.metric.distance(a, b);
        }

        let dropped = matched.iter().filter(|m| !**m).count();
        debug!(
            "projected {} bathymetry points onto {} track segments",
            points.len(),
            track.len() - 1
        );
        debug!(
            "dropped {} bathymetry samples beyond {}",
            dropped, self.max_distance
        );

        Ok(AlongTrackDepth::new(points))
    }

    /// Project several surveys in parallel, preserving input order.
    #[cfg(feature = "parallel")]
    pub fn project_all(
        &self,
        surveys: &[Bathymetry],
        mode: &ProjectionMode,
    ) -> Vec<Result<AlongTrackDepth, SectionError>> {
        use rayon::prelude::*;

        surveys.par_iter().map(|b| self.project(b, mode)).collect()
    }
}
