//! I/O utilities for reading and writing cast and bathymetry files.
//!
//! This module provides:
//! - **Cast records**: JSON objects describing a cast or a collection
//! - **Encodings**: plain JSON text, or zstd-compressed JSON binary
//! - **Bathymetry files**: `lon lat depth` soundings with `# key: value` headers
//!
//! # File Formats
//!
//! ## Cast Records
//!
//! ```text
//! {"type": "cast", "kind": "ctd", "primary_key": "pres",
//!  "properties": {"coordinates": [-10.0, 54.0], "date": "2015-04-17T15:03:00+00:00"},
//!  "data": {"pres": [1.0, 3.0, 5.0], "temp": [8.0, 7.5, null]}}
//! ```
//!
//! ## Bathymetry Files
//!
//! ```text
//! # Ship-track soundings
//! # columns: lon lat depth
//! -38.2 65.1 1240.0
//! -38.1 65.2 1310.5
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use cast_rs::io::{Encoding, load_collection, read_bathymetry_file, save_collection};
//!
//! let casts = load_collection(Path::new("cruise.nwl")).unwrap();
//! save_collection(Path::new("cruise.nwz"), &casts, Encoding::Binary).unwrap();
//!
//! let soundings = read_bathymetry_file(Path::new("track.xyz")).unwrap();
//! println!("{} soundings", soundings.len());
//! ```

mod bathymetry_reader;
mod encoding;
mod record;

pub use bathymetry_reader::{
    BathymetryFile, BathymetryFileError, read_bathymetry_file, write_bathymetry_file,
};
pub use encoding::{
    DEFAULT_COMPRESSION_LEVEL, Encoding, load, load_cast, load_collection, read_record,
    save_cast, save_collection, write_record,
};
pub use record::{CastRecord, CollectionRecord, PropertiesRecord, Record, RecordError, parse_date};
