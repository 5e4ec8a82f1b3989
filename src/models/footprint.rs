use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ActivityCategory, Scope, Unit};

/// Unit every footprint value is expressed in.
pub const FOOTPRINT_UNIT: &str = "kg CO2e";

/// One line of the audit breakdown: an activity joined with its factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub activity: ActivityCategory,
    pub quantity: f64,
    pub unit: Unit,
    /// Emission factor in kg CO2e per `unit`.
    pub factor: f64,
    /// `quantity * factor`, in kg CO2e.
    pub contribution: f64,
    pub source: String,
}

/// Footprint of a single crop instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintResult {
    pub crop: String,
    pub scope: Scope,
    pub contributions: Vec<Contribution>,
    pub total: f64,
}

impl FootprintResult {
    pub fn unit(&self) -> &'static str {
        FOOTPRINT_UNIT
    }

    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }
}

/// A set of results ready for export.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub scope: Scope,
    pub dataset_version: String,
    pub results: Vec<FootprintResult>,
}

impl Report {
    pub fn new(scope: Scope, dataset_version: &str, results: Vec<FootprintResult>) -> Self {
        Self {
            generated_at: Utc::now(),
            scope,
            dataset_version: dataset_version.to_string(),
            results,
        }
    }

    /// Sum of all result totals, in result order.
    pub fn grand_total(&self) -> f64 {
        let mut total = 0.0;
        for result in &self.results {
            total += result.total;
        }
        total
    }
}
