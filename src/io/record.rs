//! Serializable cast and collection records.
//!
//! # Record Format
//!
//! ```text
//! {"type": "cast",
//!  "kind": "ctd",
//!  "primary_key": "pres",
//!  "properties": {"coordinates": [-10.0, 54.0],
//!                 "date": "2015-04-17T15:03:00+00:00",
//!                 "notes": "CTD touched bottom"},
//!  "data": {"pres": [1.0, 3.0], "temp": [8.0, null]}}
//!
//! {"type": "collection", "casts": [<cast record>, ...]}
//! ```
//!
//! `data` holds the grid under the primary key name, and `null` marks a
//! missing value. Unknown properties are kept as free-form JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cast::{Cast, CastCollection, CastError, CastKind, CastProperties, Field};
use crate::geometry::Coordinates;

/// Grid names tried, in order, when a record does not name its primary key.
const PRIMARY_KEY_CANDIDATES: &[&str] = &["pres", "depth", "z"];

/// Error type for record conversion and file operations.
#[derive(Debug, Error)]
pub enum RecordError {
    /// IO error reading or writing a record
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unrecognized date string
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Record data does not form a valid cast
    #[error("Invalid cast record: {0}")]
    InvalidCast(#[from] CastError),

    /// The primary grid column is absent or has missing values
    #[error("Grid column '{0}' is missing or incomplete")]
    MissingGrid(String),

    /// Record describes a different object than requested
    #[error("Expected a {expected} record, found a {found} record")]
    UnexpectedType {
        /// Requested record type
        expected: &'static str,
        /// Record type in the file
        found: &'static str,
    },
}

/// Top-level persisted object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    /// A single cast
    Cast(CastRecord),
    /// An ordered cast collection
    Collection(CollectionRecord),
}

impl Record {
    /// Record type name as written in the `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Record::Cast(_) => "cast",
            Record::Collection(_) => "collection",
        }
    }

    /// Convert into a cast, failing for collection records.
    pub fn into_cast(self) -> Result<Cast, RecordError> {
        match self {
            Record::Cast(c) => c.try_into(),
            other => Err(RecordError::UnexpectedType {
                expected: "cast",
                found: other.type_name(),
            }),
        }
    }

    /// Convert into a collection, failing for cast records.
    pub fn into_collection(self) -> Result<CastCollection, RecordError> {
        match self {
            Record::Collection(c) => c.try_into(),
            other => Err(RecordError::UnexpectedType {
                expected: "collection",
                found: other.type_name(),
            }),
        }
    }
}

impl From<&Cast> for Record {
    fn from(cast: &Cast) -> Self {
        Record::Cast(cast.into())
    }
}

impl From<&CastCollection> for Record {
    fn from(collection: &CastCollection) -> Self {
        Record::Collection(collection.into())
    }
}

/// Persisted cast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CastRecord {
    /// Instrument type
    #[serde(default)]
    pub kind: CastKind,
    /// Name of the grid column in `data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    /// Station metadata
    #[serde(default)]
    pub properties: PropertiesRecord,
    /// Columns by name, including the grid
    pub data: BTreeMap<String, Field>,
}

/// Persisted station metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertiesRecord {
    /// Station position as `[lon, lat]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Observation time
    #[serde(default, skip_serializing_if = "Option::is_none", with = "date_format")]
    pub date: Option<DateTime<FixedOffset>>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Bottom depth (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    /// Any other properties
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Persisted cast collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionRecord {
    /// Member casts in track order
    pub casts: Vec<CastRecord>,
}

impl From<&Cast> for CastRecord {
    fn from(cast: &Cast) -> Self {
        let mut data = cast.fields().clone();
        data.insert(
            cast.primary_key().to_string(),
            cast.grid().iter().map(|&v| Some(v)).collect(),
        );

        let p = &cast.properties;
        Self {
            kind: cast.kind(),
            primary_key: Some(cast.primary_key().to_string()),
            properties: PropertiesRecord {
                coordinates: p.coordinates,
                date: p.date,
                notes: p.notes.clone(),
                depth: p.depth,
                extra: p.extra.clone(),
            },
            data,
        }
    }
}

impl TryFrom<CastRecord> for Cast {
    type Error = RecordError;

    fn try_from(record: CastRecord) -> Result<Self, Self::Error> {
        let CastRecord {
            kind,
            primary_key,
            properties,
            mut data,
        } = record;

        let primary_key = match primary_key {
            Some(k) => k,
            None => PRIMARY_KEY_CANDIDATES
                .iter()
                .find(|k| data.contains_key(**k))
                .map(|k| k.to_string())
                .ok_or_else(|| RecordError::MissingGrid(PRIMARY_KEY_CANDIDATES.join("|")))?,
        };

        let grid: Vec<f64> = data
            .remove(&primary_key)
            .and_then(|column| column.into_iter().collect())
            .ok_or_else(|| RecordError::MissingGrid(primary_key.clone()))?;

        let properties = CastProperties {
            coordinates: properties.coordinates,
            date: properties.date,
            notes: properties.notes,
            depth: properties.depth,
            extra: properties.extra,
        };

        let mut builder = Cast::builder(primary_key, grid)
            .kind(kind)
            .properties(properties);
        for (name, values) in data {
            builder = builder.field(name, values);
        }
        Ok(builder.build()?)
    }
}

impl From<&CastCollection> for CollectionRecord {
    fn from(collection: &CastCollection) -> Self {
        Self {
            casts: collection.iter().map(CastRecord::from).collect(),
        }
    }
}

impl TryFrom<CollectionRecord> for CastCollection {
    type Error = RecordError;

    fn try_from(record: CollectionRecord) -> Result<Self, Self::Error> {
        record.casts.into_iter().map(Cast::try_from).collect()
    }
}

/// Parse a record date.
///
/// Accepts RFC 3339 (`2015-04-17T15:03:00+02:00`), `YYYY-MM-DD HH:MM[:SS] UTC`,
/// and naive `YYYY-MM-DD[ T]HH:MM[:SS]` or `YYYY-MM-DD`, which are taken as UTC.
pub fn parse_date(s: &str) -> Result<DateTime<FixedOffset>, RecordError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let naive = s
        .strip_suffix("UTC")
        .or_else(|| s.strip_suffix('Z'))
        .unwrap_or(s)
        .trim();

    const FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    let parsed = FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(naive, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });

    parsed
        .map(|dt| dt.and_utc().fixed_offset())
        .ok_or_else(|| RecordError::InvalidDate(s.to_string()))
}

mod date_format {
    use chrono::{DateTime, FixedOffset, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<DateTime<FixedOffset>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse_date(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
