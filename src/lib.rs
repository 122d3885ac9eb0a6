//! # cast-rs
//!
//! Ocean cast collections, along-track bathymetry and section interpolation.
//!
//! This crate provides the building blocks for working with hydrographic
//! survey data:
//! - Vertical profiles (casts) on a pressure or depth grid
//! - Ordered cast collections forming a cruise track
//! - Scattered bathymetry soundings and their depth at cast stations
//! - Collection averages on a shared grid
//! - Along-track bottom profiles from projected soundings
//! - Distance x level section grids of a measured field
//! - T-S diagram overlays (isopycnals, freezing line, meltwater mixing line)
//! - JSON and zstd-compressed record files, TOML analysis configuration
//!
//! # Example
//!
//! ```
//! use cast_rs::{Aggregator, Cast, CastCollection, Coordinates, Planar, SectionInterpolator};
//!
//! let casts: CastCollection = (0..4)
//!     .map(|i| {
//!         Cast::builder("pres", vec![0.0, 100.0, 200.0])
//!             .values("temp", vec![6.0, 4.0 + 0.1 * i as f64, 3.0])
//!             .coordinates(Coordinates::new(-40.0 + i as f64, 62.0))
//!             .build()
//!             .unwrap()
//!     })
//!     .collect();
//!
//! let mean = Aggregator::new().aggregate(&casts).unwrap();
//! assert!((mean.field("temp").unwrap()[1].unwrap() - 4.15).abs() < 1e-10);
//!
//! let section = SectionInterpolator::new(&Planar, 10).interpolate(&casts, "temp").unwrap();
//! assert_eq!(section.shape(), (10, 3));
//! ```

pub mod analysis;
pub mod bathymetry;
pub mod cast;
pub mod config;
pub mod geometry;
pub mod io;
pub mod seawater;

// Re-export main types for convenience
pub use analysis::{
    AlongTrackDepth, AlongTrackPoint, Aggregator, ProjectionMode, SectionError, SectionGrid,
    SectionInterpolator, TrackProjector,
};
pub use bathymetry::{Bathymetry, BathymetryError};
pub use cast::{Cast, CastBuilder, CastCollection, CastError, CastKind, CastProperties, Field};
pub use config::{AnalysisConfig, ConfigError};
pub use geometry::{Coordinates, Geodesic, MetricKind, Planar, TrackMetric};
pub use io::{Encoding, Record, RecordError};
pub use seawater::{Eos80, SeawaterEos};
