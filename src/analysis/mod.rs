//! Cross-cast analysis: composites, along-track bathymetry, sections and T-S support.
//!
//! This module provides tools for:
//! - Averaging a collection onto a single composite cast ([`Aggregator`])
//! - Projecting bathymetry soundings onto a cruise track ([`TrackProjector`])
//! - Gridding a measured field into a distance x level section ([`SectionInterpolator`])
//! - Preparing temperature-salinity diagram overlays ([`ts`])
//!
//! All operations are read-only over their inputs and return either a
//! complete result or a [`SectionError`].
//!
//! # Along-track distance
//!
//! Distance along a track is the cumulative path length from its first
//! vertex, measured with a [`TrackMetric`](crate::geometry::TrackMetric).
//! Section columns and projected bathymetry use the same convention, so a
//! section and its bottom profile line up when built with the same metric.
//!
//! # Example
//!
//! ```
//! use cast_rs::analysis::{Aggregator, ProjectionMode, TrackProjector};
//! use cast_rs::bathymetry::Bathymetry;
//! use cast_rs::cast::{Cast, CastCollection};
//! use cast_rs::geometry::{Coordinates, Planar};
//!
//! let casts: CastCollection = [0.0, 1.0]
//!     .iter()
//!     .map(|&lon| {
//!         Cast::builder("pres", vec![0.0, 10.0])
//!             .values("temp", vec![4.0 + lon, 3.0 + lon])
//!             .coordinates(Coordinates::new(lon, 0.0))
//!             .build()
//!             .unwrap()
//!     })
//!     .collect();
//!
//! let mean = Aggregator::new().aggregate(&casts).unwrap();
//! assert_eq!(mean.field("temp").unwrap()[0], Some(4.5));
//!
//! let bathy = Bathymetry::new(
//!     vec![Coordinates::new(0.5, 0.05), Coordinates::new(0.6, 3.0)],
//!     vec![300.0, 4000.0],
//! ).unwrap();
//!
//! let mode = ProjectionMode::Projected(casts.track().unwrap());
//! let bottom = TrackProjector::new(&Planar, 0.1).project(&bathy, &mode).unwrap();
//! assert_eq!(bottom.len(), 1);
//! assert!((bottom.points()[0].distance - 0.5).abs() < 1e-10);
//! ```

mod aggregate;
mod error;
mod section;
mod track;
mod triangulation;
pub mod ts;

pub use aggregate::{Aggregator, DEFAULT_RESERVED_FIELDS};
pub use error::SectionError;
pub use section::{SectionGrid, SectionInterpolator, deepest_valid_level};
pub use track::{AlongTrackDepth, AlongTrackPoint, ProjectionMode, TrackProjector};
pub use ts::{SigmaGrid, TsFields, freezing_line, ice_mixing_line, sigma_grid, ts_series, ts_series_for};
