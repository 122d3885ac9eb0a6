//! UNESCO EOS-80 equation of state.
//!
//! # References
//!
//! - UNESCO (1981): Tenth report of the joint panel on oceanographic tables and standards.
//! - Millero & Poisson (1981): International one-atmosphere equation of state of seawater.
//! - Fofonoff & Millard (1983): Algorithms for computation of fundamental properties of seawater.

use super::SeawaterEos;

/// Standard ocean reference salinity (g/kg).
const SSO: f64 = 35.165_04;
/// Dissolved-air correction coefficients for the freezing point (TEOS-10 fit).
const AIR_A: f64 = 0.502_500_117_621 / SSO;
const AIR_B: f64 = 0.057_000_649_899;

/// EOS-80 seawater equation of state.
///
/// Pressure dependence uses the secant bulk modulus K(S, T, p).
#[derive(Clone, Copy, Debug, Default)]
pub struct Eos80;

impl Eos80 {
    /// Create a new EOS-80 calculator.
    pub fn new() -> Self {
        Self
    }

    /// Seawater density at surface pressure (p = 0).
    ///
    /// # Example
    /// ```
    /// use cast_rs::seawater::Eos80;
    ///
    /// let eos = Eos80::new();
    /// let rho = eos.density_surface(35.0, 10.0);
    /// assert!((rho - 1026.97).abs() < 0.1);
    /// ```
    pub fn density_surface(&self, salinity: f64, temperature: f64) -> f64 {
        let t = temperature;
        let s = salinity;

        // Pure water density (Bigg formula)
        let rho_w = 999.842594 + 6.793952e-2 * t - 9.095290e-3 * t.powi(2)
            + 1.001685e-4 * t.powi(3)
            - 1.120083e-6 * t.powi(4)
            + 6.536336e-9 * t.powi(5);

        let a = 8.24493e-1 - 4.0899e-3 * t + 7.6438e-5 * t.powi(2) - 8.2467e-7 * t.powi(3)
            + 5.3875e-9 * t.powi(4);
        let b = -5.72466e-3 + 1.0227e-4 * t - 1.6546e-6 * t.powi(2);
        let c = 4.8314e-4;

        rho_w + a * s + b * s.powf(1.5) + c * s.powi(2)
    }

    /// Secant bulk modulus K(S, T, p) in bar, with `pressure_bar` in bar.
    fn secant_bulk_modulus(&self, salinity: f64, temperature: f64, pressure_bar: f64) -> f64 {
        let t = temperature;
        let s = salinity;
        let p = pressure_bar;

        let kw = 19652.21 + 148.4206 * t - 2.327105 * t.powi(2) + 1.360477e-2 * t.powi(3)
            - 5.155288e-5 * t.powi(4);

        let k0 = kw
            + s * (54.6746 - 0.603459 * t + 1.09987e-2 * t.powi(2) - 6.1670e-5 * t.powi(3))
            + s.powf(1.5) * (7.944e-2 + 1.6483e-2 * t - 5.3009e-4 * t.powi(2));

        let aw = 3.239908 + 1.43713e-3 * t + 1.16092e-4 * t.powi(2) - 5.77905e-7 * t.powi(3);
        let a =
            aw + s * (2.2838e-3 - 1.0981e-5 * t - 1.6078e-6 * t.powi(2)) + s.powf(1.5) * 1.91075e-4;

        let bw = 8.50935e-5 - 6.12293e-6 * t + 5.2787e-8 * t.powi(2);
        let b = bw + s * (-9.9348e-7 + 2.0816e-8 * t + 9.1697e-10 * t.powi(2));

        k0 + p * (a + b * p)
    }
}

impl SeawaterEos for Eos80 {
    fn density(&self, salinity: f64, temperature: f64, pressure: f64) -> f64 {
        let rho_0 = self.density_surface(salinity, temperature);
        if pressure.abs() < 1e-9 {
            return rho_0;
        }
        let p_bar = pressure / 10.0;
        rho_0 / (1.0 - p_bar / self.secant_bulk_modulus(salinity, temperature, p_bar))
    }

    fn freezing_point(&self, salinity: f64, pressure: f64, air_saturation: f64) -> f64 {
        let s = salinity;
        let tf = (-0.0575 + 1.710523e-3 * s.sqrt() - 2.154996e-4 * s) * s - 7.53e-4 * pressure;
        tf - air_saturation * 1e-3 * (2.4 - AIR_A * s) * (1.0 + AIR_B * (1.0 - s / SSO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 0.1; // 0.1 kg/m³ tolerance

    #[test]
    fn test_pure_water_density() {
        let eos = Eos80::new();

        // Pure water at 4°C has maximum density ~1000 kg/m³
        assert!((eos.density_surface(0.0, 4.0) - 1000.0).abs() < TOL);
        assert!((eos.density_surface(0.0, 20.0) - 998.2).abs() < TOL);
    }

    #[test]
    fn test_seawater_density() {
        let eos = Eos80::new();

        assert!((eos.density_surface(35.0, 0.0) - 1028.1).abs() < TOL);
        assert!((eos.density_surface(35.0, 25.0) - 1023.3).abs() < TOL);
    }

    #[test]
    fn test_eos80_check_value_at_pressure() {
        // Fofonoff & Millard check value: S=35, T=25°C, p=10000 dbar
        let eos = Eos80::new();
        let rho = eos.density(35.0, 25.0, 10_000.0);
        assert!((rho - 1062.53817).abs() < 1e-3);
    }

    #[test]
    fn test_sigma() {
        let eos = Eos80::new();
        let sigma = eos.sigma(34.0, 8.0, 0.0);
        assert!(sigma > 26.0 && sigma < 27.0);
    }

    #[test]
    fn test_freezing_point_check_value() {
        // Fofonoff & Millard check value: S=40, p=500 dbar
        let eos = Eos80::new();
        let tf = eos.freezing_point(40.0, 500.0, 0.0);
        assert!((tf - (-2.588567)).abs() < 1e-5);
    }

    #[test]
    fn test_freezing_point_air_saturation() {
        let eos = Eos80::new();
        let dry = eos.freezing_point(34.5, 0.0, 0.0);
        let saturated = eos.freezing_point(34.5, 0.0, 1.0);

        assert!(dry < -1.8 && dry > -2.0);
        assert!(saturated < dry);
        assert!(dry - saturated < 0.01);
    }
}
