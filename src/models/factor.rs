use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FootprintError, Result};
use crate::models::{ActivityCategory, Unit};

/// Accounting standard a factor was published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "ipcc")]
    Ipcc,
    #[serde(rename = "pas2050")]
    Pas2050,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Ipcc, Scope::Pas2050];

    /// Short code used in datasets and on the command line.
    pub fn code(&self) -> &'static str {
        match self {
            Scope::Ipcc => "ipcc",
            Scope::Pas2050 => "pas2050",
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::Ipcc
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Ipcc => f.write_str("IPCC"),
            Scope::Pas2050 => f.write_str("PAS 2050"),
        }
    }
}

impl FromStr for Scope {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();

        match compact.as_str() {
            "ipcc" => Ok(Scope::Ipcc),
            "pas2050" => Ok(Scope::Pas2050),
            _ => Err(FootprintError::InvalidInput(format!(
                "Unknown scope: '{}' (expected ipcc or pas2050)",
                s.trim()
            ))),
        }
    }
}

/// Lookup key of the factor table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactorKey {
    pub crop: String,
    pub activity: ActivityCategory,
    pub scope: Scope,
}

/// A published emission factor: kg CO2e per unit of activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionFactor {
    pub crop: String,
    pub activity: ActivityCategory,
    pub scope: Scope,
    pub coefficient: f64,
    pub unit: Unit,
    pub source: String,
}

impl EmissionFactor {
    pub fn key(&self) -> FactorKey {
        FactorKey {
            crop: self.crop.clone(),
            activity: self.activity,
            scope: self.scope,
        }
    }

    /// Unit label for the coefficient, e.g. `kg CO2e/L`.
    pub fn coefficient_unit(&self) -> String {
        format!("kg CO2e/{}", self.unit)
    }
}
