//! Ordered cast collections representing a cruise or survey.

use std::ops::Index;

use log::{debug, warn};

use super::{Cast, Field};
use crate::analysis::SectionError;
use crate::bathymetry::Bathymetry;
use crate::geometry::{Coordinates, TrackMetric};

/// Ordered set of casts from one cruise.
///
/// Insertion order is significant: it defines the cruise track.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CastCollection {
    casts: Vec<Cast>,
}

impl CastCollection {
    /// Create a collection from casts in track order.
    pub fn new(casts: Vec<Cast>) -> Self {
        Self { casts }
    }

    /// Append a cast at the end of the track.
    pub fn push(&mut self, cast: Cast) {
        self.casts.push(cast);
    }

    /// Number of casts.
    pub fn len(&self) -> usize {
        self.casts.len()
    }

    /// Check if the collection has no casts.
    pub fn is_empty(&self) -> bool {
        self.casts.is_empty()
    }

    /// Iterate over casts in track order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cast> {
        self.casts.iter()
    }

    /// Casts as a slice.
    pub fn casts(&self) -> &[Cast] {
        &self.casts
    }

    /// Cast at position `i`.
    pub fn get(&self, i: usize) -> Option<&Cast> {
        self.casts.get(i)
    }

    /// Consume the collection, returning the casts.
    pub fn into_casts(self) -> Vec<Cast> {
        self.casts
    }

    /// Ordered station coordinates forming the cruise track.
    ///
    /// Fails with [`SectionError::MissingCoordinates`] naming the first cast
    /// without a position.
    pub fn track(&self) -> Result<Vec<Coordinates>, SectionError> {
        self.casts
            .iter()
            .enumerate()
            .map(|(i, c)| c.coordinates().ok_or(SectionError::MissingCoordinates(i)))
            .collect()
    }

    /// Stack a field across casts (one row per cast).
    pub fn as_array(&self, field: &str) -> Result<Vec<Field>, SectionError> {
        self.casts
            .iter()
            .map(|c| {
                c.column(field)
                    .ok_or_else(|| SectionError::UnknownField(field.to_string()))
            })
            .collect()
    }

    /// Attach bottom depth from a bathymetry survey to every positioned cast.
    ///
    /// Casts without coordinates, or whose position cannot be matched to the
    /// survey line, are left unchanged. Returns the number of casts updated.
    pub fn add_bathymetry(&mut self, bathymetry: &Bathymetry, metric: &dyn TrackMetric) -> usize {
        let mut updated = 0;
        for (i, cast) in self.casts.iter_mut().enumerate() {
            let Some(position) = cast.coordinates() else {
                warn!("cast {} has no coordinates; bathymetry not attached", i);
                continue;
            };
            match bathymetry.at_point(position, metric) {
                Some(depth) if cast.set_depth(depth).is_ok() => updated += 1,
                _ => warn!("no valid bathymetry depth for cast {} at {}", i, position),
            }
        }
        debug!("attached bathymetry to {}/{} casts", updated, self.casts.len());
        updated
    }
}

impl Index<usize> for CastCollection {
    type Output = Cast;

    fn index(&self, i: usize) -> &Cast {
        &self.casts[i]
    }
}

impl<'a> IntoIterator for &'a CastCollection {
    type Item = &'a Cast;
    type IntoIter = std::slice::Iter<'a, Cast>;

    fn into_iter(self) -> Self::IntoIter {
        self.casts.iter()
    }
}

impl IntoIterator for CastCollection {
    type Item = Cast;
    type IntoIter = std::vec::IntoIter<Cast>;

    fn into_iter(self) -> Self::IntoIter {
        self.casts.into_iter()
    }
}

impl FromIterator<Cast> for CastCollection {
    fn from_iter<I: IntoIterator<Item = Cast>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Cast>> for CastCollection {
    fn from(casts: Vec<Cast>) -> Self {
        Self::new(casts)
    }
}
