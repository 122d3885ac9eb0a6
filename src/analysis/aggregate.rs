//! Grid-aligned composite of a cast collection.
//!
//! The composite cast holds, for every field shared by all members, the
//! elementwise mean of the non-missing values. Reserved fields (the grid and
//! attached bottom depth) are never averaged.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::SectionError;
use crate::cast::{Cast, CastCollection, Field};

/// Field names excluded from aggregation in addition to each cast's primary key.
pub const DEFAULT_RESERVED_FIELDS: &[&str] = &["pres", "botdepth"];

/// Computes composite casts from collections sharing a vertical grid.
#[derive(Clone, Debug)]
pub struct Aggregator {
    reserved: BTreeSet<String>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::with_reserved(DEFAULT_RESERVED_FIELDS.iter().copied())
    }
}

impl Aggregator {
    /// Aggregator with the default reserved field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator excluding the given field names.
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    /// Reserved field names.
    pub fn reserved(&self) -> impl Iterator<Item = &str> {
        self.reserved.iter().map(String::as_str)
    }

    /// Average every shared, non-reserved field across the collection.
    ///
    /// The result carries the first member's grid and primary key and no
    /// station properties.
    ///
    /// # Errors
    ///
    /// - [`SectionError::EmptyGroup`] for an empty collection
    /// - [`SectionError::GridMismatch`] unless every grid is bit-identical
    ///   to the first member's
    pub fn aggregate(&self, group: &CastCollection) -> Result<Cast, SectionError> {
        let first = group.get(0).ok_or(SectionError::EmptyGroup)?;

        if let Some(i) = group
            .iter()
            .position(|c| !same_grid(c.grid(), first.grid()))
        {
            return Err(SectionError::GridMismatch(i));
        }

        let mut shared: BTreeSet<&str> = first.field_names().collect();
        for cast in group.iter().skip(1) {
            shared.retain(|name| cast.has_field(name));
        }
        shared.retain(|name| {
            !self.reserved.contains(*name) && group.iter().all(|c| c.primary_key() != *name)
        });

        let n = first.n_levels();
        let mut fields = BTreeMap::new();
        for name in shared {
            let mut sums = vec![0.0; n];
            let mut counts = vec![0usize; n];
            for values in group.iter().filter_map(|c| c.field(name)) {
                for (i, v) in values.iter().enumerate() {
                    if let Some(v) = v {
                        sums[i] += v;
                        counts[i] += 1;
                    }
                }
            }
            let mean: Field = sums
                .iter()
                .zip(&counts)
                .map(|(&s, &c)| (c > 0).then(|| s / c as f64))
                .collect();
            fields.insert(name.to_string(), mean);
        }

        debug!(
            "aggregated {} fields over {} casts",
            fields.len(),
            group.len()
        );

        // Grid copied from a valid cast; every mean has one slot per level
        Ok(Cast::from_parts(
            first.primary_key().to_string(),
            first.grid().to_vec(),
            fields,
        ))
    }

    /// Aggregate many collections, preserving input order.
    #[cfg(feature = "parallel")]
    pub fn aggregate_all(&self, groups: &[CastCollection]) -> Vec<Result<Cast, SectionError>> {
        use rayon::prelude::*;

        groups.par_iter().map(|g| self.aggregate(g)).collect()
    }
}

fn same_grid(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}
