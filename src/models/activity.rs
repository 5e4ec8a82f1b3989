use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FootprintError, Result};

/// Unit of measure for an activity quantity.
///
/// Aliases are accepted when parsing, but there is no conversion between units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "L")]
    Litre,
    #[serde(rename = "m3")]
    CubicMetre,
    #[serde(rename = "kWh")]
    KilowattHour,
}

impl Unit {
    /// Canonical symbol used in reports and datasets.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Litre => "L",
            Unit::CubicMetre => "m3",
            Unit::KilowattHour => "kWh",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(Unit::Kilogram),
            "l" | "litre" | "litres" | "liter" | "liters" => Ok(Unit::Litre),
            "m3" | "m³" | "cubic_metre" | "cubic_meter" | "cubic metres" | "cubic meters" => {
                Ok(Unit::CubicMetre)
            }
            "kwh" | "kilowatt_hour" | "kilowatt hours" | "kilowatt_hours" => {
                Ok(Unit::KilowattHour)
            }
            other => Err(FootprintError::InvalidInput(format!(
                "Unknown unit: '{}'",
                other
            ))),
        }
    }
}

/// Category of farm activity that produces emissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    #[serde(alias = "fertilizer_application")]
    Fertilizer,
    #[serde(alias = "fuel_combustion")]
    Fuel,
    Irrigation,
    Electricity,
    Pesticide,
    Seed,
}

impl ActivityCategory {
    /// All categories, in display order.
    pub const ALL: [ActivityCategory; 6] = [
        ActivityCategory::Fertilizer,
        ActivityCategory::Fuel,
        ActivityCategory::Irrigation,
        ActivityCategory::Electricity,
        ActivityCategory::Pesticide,
        ActivityCategory::Seed,
    ];

    /// The unit quantities of this category must be recorded in.
    pub fn expected_unit(&self) -> Unit {
        match self {
            ActivityCategory::Fertilizer => Unit::Kilogram,
            ActivityCategory::Fuel => Unit::Litre,
            ActivityCategory::Irrigation => Unit::CubicMetre,
            ActivityCategory::Electricity => Unit::KilowattHour,
            ActivityCategory::Pesticide => Unit::Kilogram,
            ActivityCategory::Seed => Unit::Kilogram,
        }
    }

    /// Short code used in datasets and reports.
    pub fn code(&self) -> &'static str {
        match self {
            ActivityCategory::Fertilizer => "fertilizer",
            ActivityCategory::Fuel => "fuel",
            ActivityCategory::Irrigation => "irrigation",
            ActivityCategory::Electricity => "electricity",
            ActivityCategory::Pesticide => "pesticide",
            ActivityCategory::Seed => "seed",
        }
    }

    /// Human-readable label for prompts.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::Fertilizer => "Fertilizer application",
            ActivityCategory::Fuel => "Fuel combustion",
            ActivityCategory::Irrigation => "Irrigation water",
            ActivityCategory::Electricity => "Electricity use",
            ActivityCategory::Pesticide => "Pesticide application",
            ActivityCategory::Seed => "Seed",
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ActivityCategory {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "fertilizer" | "fertiliser" | "fertilizer_application" => {
                Ok(ActivityCategory::Fertilizer)
            }
            "fuel" | "fuel_combustion" => Ok(ActivityCategory::Fuel),
            "irrigation" => Ok(ActivityCategory::Irrigation),
            "electricity" => Ok(ActivityCategory::Electricity),
            "pesticide" | "pesticides" => Ok(ActivityCategory::Pesticide),
            "seed" | "seeds" => Ok(ActivityCategory::Seed),
            other => Err(FootprintError::InvalidInput(format!(
                "Unknown activity category: '{}'",
                other
            ))),
        }
    }
}

/// Normalize a crop code: trimmed and lowercase.
pub fn normalize_crop(crop: &str) -> String {
    crop.trim().to_lowercase()
}

/// An unvalidated activity entry as typed into the form or read from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawActivity {
    pub crop: String,
    pub activity: String,
    pub quantity: f64,
    pub unit: String,
}

impl RawActivity {
    pub fn new(crop: &str, activity: &str, quantity: f64, unit: &str) -> Self {
        Self {
            crop: crop.to_string(),
            activity: activity.to_string(),
            quantity,
            unit: unit.to_string(),
        }
    }
}

/// A validated activity record.
///
/// Only the collector builds these, so every instance has a normalized crop,
/// a finite non-negative quantity and the unit its category expects.
#[derive(Debug, Clone, PartialEq)]
pub struct CropActivity {
    crop: String,
    category: ActivityCategory,
    quantity: f64,
    unit: Unit,
}

impl CropActivity {
    pub(crate) fn new(crop: String, category: ActivityCategory, quantity: f64, unit: Unit) -> Self {
        Self {
            crop,
            category,
            quantity,
            unit,
        }
    }

    pub fn crop(&self) -> &str {
        &self.crop
    }

    pub fn category(&self) -> ActivityCategory {
        self.category
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_aliases() {
        assert_eq!("kg".parse::<Unit>().unwrap(), Unit::Kilogram);
        assert_eq!("Litres".parse::<Unit>().unwrap(), Unit::Litre);
        assert_eq!("m³".parse::<Unit>().unwrap(), Unit::CubicMetre);
        assert_eq!("KWH".parse::<Unit>().unwrap(), Unit::KilowattHour);
        assert!("gallon".parse::<Unit>().is_err());
    }

    #[test]
    fn test_category_parse_long_forms() {
        assert_eq!(
            "Fertilizer Application".parse::<ActivityCategory>().unwrap(),
            ActivityCategory::Fertilizer
        );
        assert_eq!(
            "fuel-combustion".parse::<ActivityCategory>().unwrap(),
            ActivityCategory::Fuel
        );
        assert!("harvesting".parse::<ActivityCategory>().is_err());
    }

    #[test]
    fn test_expected_units() {
        assert_eq!(ActivityCategory::Fertilizer.expected_unit(), Unit::Kilogram);
        assert_eq!(ActivityCategory::Fuel.expected_unit(), Unit::Litre);
        assert_eq!(ActivityCategory::Irrigation.expected_unit(), Unit::CubicMetre);
    }

    #[test]
    fn test_category_display_roundtrips_through_parse() {
        for category in ActivityCategory::ALL {
            assert_eq!(category.to_string().parse::<ActivityCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_normalize_crop() {
        assert_eq!(normalize_crop("  Wheat "), "wheat");
    }
}
