//! Seawater equation of state.
//!
//! Density and freezing temperature are needed for derived cast fields and
//! for T-S diagram overlays (isopycnals and the freezing line). They are
//! consumed through the [`SeawaterEos`] trait; [`Eos80`] implements the
//! UNESCO EOS-80 formulation.
//!
//! # Units
//!
//! - Temperature: °C
//! - Salinity: PSU (practical salinity units)
//! - Pressure: dbar (decibars), where 1 dbar ≈ 1 m depth
//! - Density: kg/m³

mod eos80;

pub use eos80::Eos80;

/// Seawater thermodynamics used by the analysis code.
pub trait SeawaterEos: Send + Sync {
    /// In-situ density ρ(S, T, p) in kg/m³.
    fn density(&self, salinity: f64, temperature: f64, pressure: f64) -> f64;

    /// Freezing temperature in °C.
    ///
    /// `air_saturation` is the dissolved-air saturation fraction in [0, 1];
    /// dissolved air lowers the freezing point slightly.
    fn freezing_point(&self, salinity: f64, pressure: f64, air_saturation: f64) -> f64;

    /// Density anomaly σ = ρ(S, T, p) - 1000 kg/m³.
    fn sigma(&self, salinity: f64, temperature: f64, pressure: f64) -> f64 {
        self.density(salinity, temperature, pressure) - 1000.0
    }
}
