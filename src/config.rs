//! Analysis configuration file support.
//!
//! Settings for the analysis pipeline can be read from a TOML file. Every key
//! is optional; missing keys take the defaults of [`AnalysisConfig::default`].
//!
//! ```toml
//! metric = "geodesic"
//! max_distance = 5000.0
//! track_resolution = 40
//! reserved_fields = ["pres", "botdepth", "flag"]
//!
//! [ts]
//! salinity = "sal"
//! temperature = ["theta", "temp"]
//! contour_interval = 0.5
//! air_saturation = 0.1
//! freezing_pressure = 0.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::{
    Aggregator, DEFAULT_RESERVED_FIELDS, SectionInterpolator, SigmaGrid, TrackProjector,
    TsFields, freezing_line,
};
use crate::geometry::MetricKind;
use crate::seawater::SeawaterEos;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed TOML or wrong value types
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Values that parse but cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Geometry used for along-track distances
    pub metric: MetricKind,
    /// Bathymetry matching threshold, in units of `metric`
    pub max_distance: f64,
    /// Number of distance columns in section grids
    pub track_resolution: usize,
    /// Fields excluded from collection averages
    pub reserved_fields: Vec<String>,
    /// T-S diagram settings
    pub ts: TsSettings,
}

/// T-S diagram settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsSettings {
    /// Salinity field name
    pub salinity: String,
    /// Temperature candidates, tried in order
    pub temperature: Vec<String>,
    /// Spacing of density contours (kg/m³)
    pub contour_interval: f64,
    /// Dissolved-air fraction for the freezing line
    pub air_saturation: f64,
    /// Pressure of the freezing line (dbar)
    pub freezing_pressure: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            metric: MetricKind::default(),
            max_distance: 1000.0,
            track_resolution: 30,
            reserved_fields: DEFAULT_RESERVED_FIELDS.iter().map(|s| s.to_string()).collect(),
            ts: TsSettings::default(),
        }
    }
}

impl Default for TsSettings {
    fn default() -> Self {
        Self {
            salinity: "sal".to_string(),
            temperature: vec!["theta".to_string(), "temp".to_string()],
            contour_interval: 0.5,
            air_saturation: 0.1,
            freezing_pressure: 0.0,
        }
    }
}

impl AnalysisConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Set the metric.
    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    /// Set the bathymetry matching threshold.
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Set the section resolution.
    pub fn with_track_resolution(mut self, track_resolution: usize) -> Self {
        self.track_resolution = track_resolution;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_distance.is_finite() || self.max_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_distance must be a non-negative number, got {}",
                self.max_distance
            )));
        }
        if self.track_resolution == 0 {
            return Err(ConfigError::Invalid(
                "track_resolution must be at least 1".to_string(),
            ));
        }
        if self.ts.temperature.is_empty() {
            return Err(ConfigError::Invalid(
                "ts.temperature needs at least one field name".to_string(),
            ));
        }
        if !self.ts.contour_interval.is_finite() || self.ts.contour_interval <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "ts.contour_interval must be positive, got {}",
                self.ts.contour_interval
            )));
        }
        if !(0.0..=1.0).contains(&self.ts.air_saturation) {
            return Err(ConfigError::Invalid(format!(
                "ts.air_saturation must be in [0, 1], got {}",
                self.ts.air_saturation
            )));
        }
        if !self.ts.freezing_pressure.is_finite() || self.ts.freezing_pressure < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "ts.freezing_pressure must be a non-negative number, got {}",
                self.ts.freezing_pressure
            )));
        }
        Ok(())
    }

    /// Aggregator excluding the configured reserved fields.
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::with_reserved(self.reserved_fields.iter().cloned())
    }

    /// Track projector using the configured metric and threshold.
    pub fn projector(&self) -> TrackProjector<'static> {
        TrackProjector::new(self.metric.metric(), self.max_distance)
    }

    /// Section interpolator using the configured metric and resolution.
    pub fn interpolator(&self) -> SectionInterpolator<'static> {
        SectionInterpolator::new(self.metric.metric(), self.track_resolution)
    }

    /// T-S field names.
    pub fn ts_fields(&self) -> TsFields {
        TsFields::default()
            .with_salinity(self.ts.salinity.clone())
            .with_temperature(self.ts.temperature.iter().cloned())
    }

    /// Density contour levels of `grid` at the configured interval.
    pub fn contour_levels(&self, grid: &SigmaGrid) -> Vec<f64> {
        grid.contour_levels(self.ts.contour_interval)
    }

    /// Freezing line over `salinities` at the configured pressure and air
    /// saturation.
    pub fn freezing_line(&self, eos: &dyn SeawaterEos, salinities: &[f64]) -> Vec<(f64, f64)> {
        freezing_line(eos, salinities, self.ts.freezing_pressure, self.ts.air_saturation)
    }
}
