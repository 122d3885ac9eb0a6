//! Single-cast profile storage.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Coordinates;
use crate::seawater::SeawaterEos;

/// Measurement vector aligned with a cast grid. `None` marks a missing value.
pub type Field = Vec<Option<f64>>;

/// Error type for cast construction and modification.
#[derive(Debug, Error, PartialEq)]
pub enum CastError {
    /// The vertical grid has no levels
    #[error("Cast grid must not be empty")]
    EmptyGrid,

    /// The vertical grid is not strictly increasing or contains non-finite values
    #[error("Cast grid must be finite and strictly increasing (violated at index {0})")]
    NonMonotonicGrid(usize),

    /// A field vector does not match the grid length
    #[error("Field '{name}' has {len} values but the grid has {expected} levels")]
    LengthMismatch {
        /// Field name
        name: String,
        /// Field length
        len: usize,
        /// Grid length
        expected: usize,
    },

    /// A field uses the name of the primary grid
    #[error("Field name '{0}' is the primary key of the cast")]
    DuplicateField(String),

    /// A field needed for a derived quantity is absent
    #[error("Missing field: {0}")]
    MissingField(String),

    /// Coordinates outside the valid (lon, lat) range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(Coordinates),

    /// Bottom depth must be positive and finite
    #[error("Invalid depth: {0}")]
    InvalidDepth(f64),
}

/// Instrument type that produced a cast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastKind {
    /// Unspecified instrument
    #[default]
    Generic,
    /// Conductivity-temperature-depth profiler
    Ctd,
    /// Expendable bathythermograph
    Xbt,
    /// Lowered acoustic Doppler current profiler
    Ladcp,
}

impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CastKind::Generic => "cast",
            CastKind::Ctd => "CTD",
            CastKind::Xbt => "XBT",
            CastKind::Ladcp => "LADCP",
        };
        f.write_str(name)
    }
}

/// Cast metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CastProperties {
    /// Station position
    pub coordinates: Option<Coordinates>,
    /// Timezone-aware observation time
    pub date: Option<DateTime<FixedOffset>>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Bottom depth at the station (m, positive downward)
    pub depth: Option<f64>,
    /// Any other properties, kept verbatim
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Convert raw values to a field, mapping NaN to missing.
pub fn field_from_values<I>(values: I) -> Field
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .map(|v| if v.is_nan() { None } else { Some(v) })
        .collect()
}

/// A single vertical profile.
///
/// Invariants, checked at construction:
/// - the grid is non-empty, finite and strictly increasing
/// - every field has exactly one slot per grid level
/// - coordinates, when present, are a valid (lon, lat) pair
#[derive(Clone, Debug, PartialEq)]
pub struct Cast {
    primary_key: String,
    grid: Vec<f64>,
    fields: BTreeMap<String, Field>,
    kind: CastKind,
    /// Station metadata
    pub properties: CastProperties,
}

impl Cast {
    /// Create a cast from a grid and a set of fields.
    pub fn new(
        primary_key: impl Into<String>,
        grid: Vec<f64>,
        fields: BTreeMap<String, Field>,
    ) -> Result<Self, CastError> {
        let primary_key = primary_key.into();
        validate_grid(&grid)?;
        for (name, values) in &fields {
            validate_field(&primary_key, name, values, grid.len())?;
        }

        Ok(Self {
            primary_key,
            grid,
            fields,
            kind: CastKind::Generic,
            properties: CastProperties::default(),
        })
    }

    /// Assemble a cast from parts that already satisfy the invariants.
    pub(crate) fn from_parts(
        primary_key: String,
        grid: Vec<f64>,
        fields: BTreeMap<String, Field>,
    ) -> Self {
        Self {
            primary_key,
            grid,
            fields,
            kind: CastKind::Generic,
            properties: CastProperties::default(),
        }
    }

    /// Start building a cast on the given grid.
    pub fn builder(primary_key: impl Into<String>, grid: Vec<f64>) -> CastBuilder {
        CastBuilder {
            primary_key: primary_key.into(),
            grid,
            fields: BTreeMap::new(),
            kind: CastKind::Generic,
            properties: CastProperties::default(),
        }
    }

    /// Name of the primary grid field (e.g. "pres").
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Vertical grid values.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Number of vertical levels.
    pub fn n_levels(&self) -> usize {
        self.grid.len()
    }

    /// Instrument type.
    pub fn kind(&self) -> CastKind {
        self.kind
    }

    /// Station coordinates, if known.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.properties.coordinates
    }

    /// Measurement field by name (excludes the primary grid).
    pub fn field(&self, name: &str) -> Option<&[Option<f64>]> {
        self.fields.get(name).map(|v| v.as_slice())
    }

    /// Check whether a measurement field exists.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Names of all measurement fields, in sorted order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    /// All measurement fields.
    pub fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }

    /// Any column by name, including the primary grid.
    pub fn column(&self, name: &str) -> Option<Field> {
        if name == self.primary_key {
            Some(self.grid.iter().map(|&v| Some(v)).collect())
        } else {
            self.fields.get(name).cloned()
        }
    }

    /// Attach or replace a measurement field.
    pub fn add_field(&mut self, name: impl Into<String>, values: Field) -> Result<(), CastError> {
        let name = name.into();
        validate_field(&self.primary_key, &name, &values, self.grid.len())?;
        self.fields.insert(name, values);
        Ok(())
    }

    /// Set the bottom depth property.
    pub fn set_depth(&mut self, depth: f64) -> Result<(), CastError> {
        if !depth.is_finite() || depth <= 0.0 {
            return Err(CastError::InvalidDepth(depth));
        }
        self.properties.depth = Some(depth);
        Ok(())
    }

    /// Largest grid value at which `field` has a valid value.
    pub fn deepest_valid_level(&self, field: &str) -> Option<f64> {
        let values = self.field(field)?;
        self.grid
            .iter()
            .zip(values)
            .rev()
            .find_map(|(&z, v)| v.as_ref().map(|_| z))
    }

    /// Compute in-situ density from salinity and temperature fields and attach it.
    ///
    /// The grid is used as pressure (dbar). A level is missing in the output
    /// when either input is missing.
    pub fn add_density(
        &mut self,
        eos: &dyn SeawaterEos,
        salinity: &str,
        temperature: &str,
        output: &str,
    ) -> Result<(), CastError> {
        let sal = self
            .field(salinity)
            .ok_or_else(|| CastError::MissingField(salinity.to_string()))?;
        let temp = self
            .field(temperature)
            .ok_or_else(|| CastError::MissingField(temperature.to_string()))?;

        let rho: Field = self
            .grid
            .iter()
            .zip(sal.iter().zip(temp))
            .map(|(&p, (s, t))| match (s, t) {
                (Some(s), Some(t)) => Some(eos.density(*s, *t, p)),
                _ => None,
            })
            .collect();

        self.add_field(output, rho)
    }
}

/// Builder for [`Cast`].
#[derive(Clone, Debug)]
pub struct CastBuilder {
    primary_key: String,
    grid: Vec<f64>,
    fields: BTreeMap<String, Field>,
    kind: CastKind,
    properties: CastProperties,
}

impl CastBuilder {
    /// Add a field with explicit missing values.
    pub fn field(mut self, name: impl Into<String>, values: Field) -> Self {
        self.fields.insert(name.into(), values);
        self
    }

    /// Add a field from raw values; NaN becomes missing.
    pub fn values(self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.field(name, field_from_values(values))
    }

    /// Set the instrument type.
    pub fn kind(mut self, kind: CastKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set station coordinates.
    pub fn coordinates(mut self, coordinates: Coordinates) -> Self {
        self.properties.coordinates = Some(coordinates);
        self
    }

    /// Set observation time.
    pub fn date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.properties.date = Some(date);
        self
    }

    /// Set notes.
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.properties.notes = Some(notes.into());
        self
    }

    /// Replace all properties.
    pub fn properties(mut self, properties: CastProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Validate and build the cast.
    pub fn build(self) -> Result<Cast, CastError> {
        if let Some(c) = self.properties.coordinates {
            if !c.is_valid() {
                return Err(CastError::InvalidCoordinates(c));
            }
        }
        if let Some(d) = self.properties.depth {
            if !d.is_finite() || d <= 0.0 {
                return Err(CastError::InvalidDepth(d));
            }
        }

        let mut cast = Cast::new(self.primary_key, self.grid, self.fields)?;
        cast.kind = self.kind;
        cast.properties = self.properties;
        Ok(cast)
    }
}

fn validate_grid(grid: &[f64]) -> Result<(), CastError> {
    if grid.is_empty() {
        return Err(CastError::EmptyGrid);
    }
    if let Some(i) = grid.iter().position(|v| !v.is_finite()) {
        return Err(CastError::NonMonotonicGrid(i));
    }
    if let Some(i) = grid.windows(2).position(|w| w[1] <= w[0]) {
        return Err(CastError::NonMonotonicGrid(i + 1));
    }
    Ok(())
}

fn validate_field(
    primary_key: &str,
    name: &str,
    values: &[Option<f64>],
    expected: usize,
) -> Result<(), CastError> {
    if name == primary_key {
        return Err(CastError::DuplicateField(name.to_string()));
    }
    if values.len() != expected {
        return Err(CastError::LengthMismatch {
            name: name.to_string(),
            len: values.len(),
            expected,
        });
    }
    Ok(())
}
