use std::collections::{BTreeSet, HashMap};

use crate::error::{FootprintError, Result};
use crate::models::{ActivityCategory, EmissionFactor, FactorKey, Scope, normalize_crop};

/// Read-only access to emission factors.
///
/// The calculator only depends on this trait, so a richer factor source
/// (regional tables, another standard) can be dropped in without touching
/// collection or export.
pub trait FactorSource {
    /// Look up the factor for a (crop, activity, scope) combination.
    fn lookup(&self, crop: &str, activity: ActivityCategory, scope: Scope)
    -> Result<&EmissionFactor>;

    /// Version label of the dataset backing this source.
    fn version(&self) -> &str;
}

/// Emission factors keyed by (crop, activity, scope).
///
/// Built once from a dataset and never mutated; reload a new dataset version
/// to change factors.
#[derive(Debug, Clone)]
pub struct EmissionFactorTable {
    version: String,
    factors: HashMap<FactorKey, EmissionFactor>,
}

impl EmissionFactorTable {
    /// Build a table from a list of factors.
    ///
    /// Crop codes are normalized. Duplicate keys keep the last occurrence.
    pub fn new(version: &str, factors: Vec<EmissionFactor>) -> Result<Self> {
        let mut map = HashMap::with_capacity(factors.len());

        for (i, mut factor) in factors.into_iter().enumerate() {
            factor.crop = normalize_crop(&factor.crop);
            validate_factor(i, &factor)?;

            let key = factor.key();
            if let Some(previous) = map.insert(key, factor) {
                tracing::warn!(
                    crop = %previous.crop,
                    activity = %previous.activity,
                    scope = %previous.scope,
                    "duplicate emission factor at record {}, keeping the later one",
                    i
                );
            }
        }

        Ok(Self {
            version: version.to_string(),
            factors: map,
        })
    }

    /// Number of distinct factors.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// All factors, sorted by crop, activity and scope.
    pub fn all_factors(&self) -> Vec<&EmissionFactor> {
        let mut factors: Vec<&EmissionFactor> = self.factors.values().collect();
        factors.sort_by_key(|f| f.key());
        factors
    }

    /// Factors for one crop, sorted by activity and scope.
    pub fn factors_for_crop(&self, crop: &str) -> Vec<&EmissionFactor> {
        let crop = normalize_crop(crop);
        let mut factors: Vec<&EmissionFactor> =
            self.factors.values().filter(|f| f.crop == crop).collect();
        factors.sort_by_key(|f| f.key());
        factors
    }

    /// Distinct crop codes, sorted.
    pub fn crops(&self) -> Vec<String> {
        self.factors
            .values()
            .map(|f| f.crop.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether the table has any factor for this crop.
    pub fn has_crop(&self, crop: &str) -> bool {
        let crop = normalize_crop(crop);
        self.factors.values().any(|f| f.crop == crop)
    }
}

impl FactorSource for EmissionFactorTable {
    fn lookup(
        &self,
        crop: &str,
        activity: ActivityCategory,
        scope: Scope,
    ) -> Result<&EmissionFactor> {
        let key = FactorKey {
            crop: normalize_crop(crop),
            activity,
            scope,
        };

        self.factors
            .get(&key)
            .ok_or_else(|| FootprintError::FactorNotFound {
                crop: key.crop.clone(),
                activity,
                scope,
            })
    }

    fn version(&self) -> &str {
        &self.version
    }
}

fn validate_factor(index: usize, factor: &EmissionFactor) -> Result<()> {
    if factor.crop.is_empty() {
        return Err(FootprintError::InvalidDataset(format!(
            "record {} has an empty crop code",
            index
        )));
    }

    if !factor.coefficient.is_finite() {
        return Err(FootprintError::InvalidDataset(format!(
            "record {} ({} / {}) has a non-finite coefficient",
            index, factor.crop, factor.activity
        )));
    }

    let expected = factor.activity.expected_unit();
    if factor.unit != expected {
        return Err(FootprintError::InvalidDataset(format!(
            "record {} ({} / {}) is per {} but {} is recorded in {}",
            index, factor.crop, factor.activity, factor.unit, factor.activity, expected
        )));
    }

    Ok(())
}
