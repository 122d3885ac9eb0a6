//! Vertical profile casts and cruise collections.
//!
//! A [`Cast`] is a single vertical measurement series: a strictly increasing
//! grid (pressure or depth) plus named measurement vectors aligned with it.
//! Missing values are stored explicitly as `None`.
//!
//! A [`CastCollection`] is an ordered set of casts from one cruise; the order
//! of the casts defines the cruise track.
//!
//! # Example
//!
//! ```
//! use cast_rs::cast::{Cast, CastCollection, CastKind};
//! use cast_rs::geometry::Coordinates;
//!
//! let pres: Vec<f64> = (0..50).map(|i| i as f64 * 2.0).collect();
//! let temp: Vec<f64> = pres.iter().map(|p| 8.0 - 0.02 * p).collect();
//!
//! let cast = Cast::builder("pres", pres)
//!     .values("temp", temp)
//!     .kind(CastKind::Ctd)
//!     .coordinates(Coordinates::new(-17.42, 80.09))
//!     .build()
//!     .unwrap();
//!
//! let cc = CastCollection::new(vec![cast.clone(), cast]);
//! assert_eq!(cc.len(), 2);
//! assert_eq!(cc.track().unwrap().len(), 2);
//! ```

mod collection;
mod profile;

pub use collection::CastCollection;
pub use profile::{Cast, CastBuilder, CastError, CastKind, CastProperties, Field, field_from_values};
