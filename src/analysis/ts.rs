//! Temperature-salinity diagram support.
//!
//! Numeric inputs for a T-S plot: per-cast (salinity, temperature) pairs,
//! a density-anomaly grid for isopycnal contours, the freezing line, and the
//! meltwater mixing line towards the effective temperature of glacial ice.

use super::{Aggregator, SectionError};
use crate::cast::{Cast, CastCollection};
use crate::seawater::SeawaterEos;

/// Latent heat of fusion of ice (J/kg).
const LATENT_HEAT: f64 = 335.0e3;
/// Specific heat capacity of seawater (J/kg/K).
const CP_WATER: f64 = 4.18e3;
/// Specific heat capacity of ice (J/kg/K).
const CP_ICE: f64 = 2.11e3;

/// Field names for T-S series.
#[derive(Clone, Debug)]
pub struct TsFields {
    salinity: String,
    temperature: Vec<String>,
}

impl Default for TsFields {
    fn default() -> Self {
        Self {
            salinity: "sal".into(),
            temperature: vec!["theta".into(), "temp".into()],
        }
    }
}

impl TsFields {
    /// Use `name` for salinity.
    pub fn with_salinity(mut self, name: impl Into<String>) -> Self {
        self.salinity = name.into();
        self
    }

    /// Temperature field candidates, tried in order.
    pub fn with_temperature<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.temperature = names.into_iter().map(Into::into).collect();
        self
    }

    /// (salinity, temperature) pairs where both are present.
    pub fn series(&self, cast: &Cast) -> Result<Vec<(f64, f64)>, SectionError> {
        let sal = cast
            .field(&self.salinity)
            .ok_or_else(|| SectionError::UnknownField(self.salinity.clone()))?;
        let temp = self
            .temperature
            .iter()
            .find_map(|name| cast.field(name))
            .ok_or_else(|| SectionError::UnknownField(self.temperature.join("|")))?;

        Ok(sal
            .iter()
            .zip(temp)
            .filter_map(|(s, t)| Some(((*s)?, (*t)?)))
            .collect())
    }

    /// One series per cast, or a single series of the collection composite
    /// when `average` is set.
    pub fn series_for(
        &self,
        group: &CastCollection,
        average: bool,
    ) -> Result<Vec<Vec<(f64, f64)>>, SectionError> {
        if average {
            let composite = Aggregator::new().aggregate(group)?;
            return Ok(vec![self.series(&composite)?]);
        }
        group.iter().map(|c| self.series(c)).collect()
    }
}

/// (salinity, temperature) pairs of a cast using the default field names.
pub fn ts_series(cast: &Cast) -> Result<Vec<(f64, f64)>, SectionError> {
    TsFields::default().series(cast)
}

/// T-S series of a collection using the default field names.
pub fn ts_series_for(
    group: &CastCollection,
    average: bool,
) -> Result<Vec<Vec<(f64, f64)>>, SectionError> {
    TsFields::default().series_for(group, average)
}

/// Surface density anomaly on a regular (salinity, temperature) grid.
#[derive(Clone, Debug, PartialEq)]
pub struct SigmaGrid {
    /// Salinity axis
    pub salinity: Vec<f64>,
    /// Temperature axis
    pub temperature: Vec<f64>,
    /// σ = ρ(S, T, 0) - 1000, indexed `[temperature][salinity]`
    pub sigma: Vec<Vec<f64>>,
}

impl SigmaGrid {
    /// Smallest and largest σ on the grid.
    pub fn range(&self) -> (f64, f64) {
        self.sigma
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Contour levels every `interval`, from `floor(min)` up to (excluding) `ceil(max)`.
    pub fn contour_levels(&self, interval: f64) -> Vec<f64> {
        if interval.is_nan() || interval <= 0.0 {
            return Vec::new();
        }
        let (lo, hi) = self.range();
        if !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        let start = lo.floor();
        let stop = hi.ceil();
        let n = ((stop - start) / interval).ceil().max(0.0) as usize;
        (0..n).map(|i| start + interval * i as f64).collect()
    }
}

/// σ on an `n` x `n` grid spanning the given salinity and temperature ranges.
pub fn sigma_grid(
    eos: &dyn SeawaterEos,
    salinity_range: (f64, f64),
    temperature_range: (f64, f64),
    n: usize,
) -> SigmaGrid {
    let salinity = axis(salinity_range, n);
    let temperature = axis(temperature_range, n);
    let sigma = temperature
        .iter()
        .map(|&t| salinity.iter().map(|&s| eos.sigma(s, t, 0.0)).collect())
        .collect();
    SigmaGrid {
        salinity,
        temperature,
        sigma,
    }
}

/// Freezing temperature at `pressure` for each salinity.
pub fn freezing_line(
    eos: &dyn SeawaterEos,
    salinities: &[f64],
    pressure: f64,
    air_saturation: f64,
) -> Vec<(f64, f64)> {
    salinities
        .iter()
        .map(|&s| (s, eos.freezing_point(s, pressure, air_saturation)))
        .collect()
}

/// Meltwater mixing line from `origin` (salinity, temperature) to the
/// effective temperature of ice at `ice_theta` (Jenkins, 1999).
pub fn ice_mixing_line(origin: (f64, f64), ice_theta: f64) -> [(f64, f64); 2] {
    let effective = -LATENT_HEAT / CP_WATER - CP_ICE / CP_WATER * (0.0 - ice_theta);
    [origin, (0.0, effective)]
}

fn axis((lo, hi): (f64, f64), n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seawater::Eos80;

    fn cast(theta: bool, sal: Vec<f64>, temp: Vec<f64>) -> Cast {
        let name = if theta { "theta" } else { "temp" };
        Cast::builder("pres", vec![0.0, 10.0, 20.0])
            .values("sal", sal)
            .values(name, temp)
            .build()
            .unwrap()
    }

    #[test]
    fn test_series_skips_missing() {
        let c = cast(true, vec![34.0, f64::NAN, 34.8], vec![2.0, 1.5, f64::NAN]);
        assert_eq!(ts_series(&c).unwrap(), vec![(34.0, 2.0)]);
    }

    #[test]
    fn test_temperature_fallback() {
        let c = cast(false, vec![34.0, 34.5, 34.8], vec![2.0, 1.5, 1.0]);
        assert_eq!(ts_series(&c).unwrap().len(), 3);

        let strict = TsFields::default().with_temperature(["theta"]);
        assert_eq!(
            strict.series(&c),
            Err(SectionError::UnknownField("theta".into()))
        );
    }

    #[test]
    fn test_series_for_average() {
        let cc = CastCollection::new(vec![
            cast(true, vec![34.0, 34.2, 34.4], vec![2.0, 1.0, 0.0]),
            cast(true, vec![35.0, 35.2, 35.4], vec![4.0, 3.0, 2.0]),
        ]);

        let each = ts_series_for(&cc, false).unwrap();
        assert_eq!(each.len(), 2);

        let avg = ts_series_for(&cc, true).unwrap();
        assert_eq!(avg.len(), 1);
        assert!((avg[0][0].0 - 34.5).abs() < 1e-10);
        assert!((avg[0][0].1 - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_sigma_grid() {
        let grid = sigma_grid(&Eos80, (33.0, 35.0), (-2.0, 10.0), 50);
        assert_eq!(grid.sigma.len(), 50);
        assert_eq!(grid.sigma[0].len(), 50);

        // Saltier and colder is denser
        assert!(grid.sigma[0][49] > grid.sigma[0][0]);
        assert!(grid.sigma[0][0] > grid.sigma[49][0]);

        let levels = grid.contour_levels(0.5);
        let (lo, hi) = grid.range();
        assert!((levels[0] - lo.floor()).abs() < 1e-12);
        assert!(*levels.last().unwrap() < hi.ceil());
        assert!(grid.contour_levels(0.0).is_empty());
    }

    #[test]
    fn test_freezing_line() {
        let line = freezing_line(&Eos80, &[30.0, 35.0], 0.0, 0.1);
        assert_eq!(line.len(), 2);
        assert!(line[1].1 < line[0].1);
    }

    #[test]
    fn test_ice_mixing_line() {
        let [origin, ice] = ice_mixing_line((34.5, 0.5), -20.0);
        assert_eq!(origin, (34.5, 0.5));
        assert_eq!(ice.0, 0.0);
        let expected = -335.0e3 / 4.18e3 - 2.11e3 / 4.18e3 * 20.0;
        assert!((ice.1 - expected).abs() < 1e-10);
    }
}
