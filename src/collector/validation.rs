use crate::error::{FootprintError, Result};
use crate::models::{ActivityCategory, CropActivity, RawActivity, Unit, normalize_crop};

/// An entry the collector refused, with the reason shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub index: usize,
    pub entry: RawActivity,
    pub reason: String,
}

impl Rejection {
    pub fn into_error(self) -> FootprintError {
        FootprintError::InvalidActivityInput {
            index: self.index,
            reason: self.reason,
        }
    }
}

/// Result of lenient collection: accepted activities in input order plus rejections.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub accepted: Vec<CropActivity>,
    pub rejected: Vec<Rejection>,
}

impl Collected {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

fn reason_of(e: FootprintError) -> String {
    match e {
        FootprintError::InvalidInput(msg) => msg,
        other => other.to_string(),
    }
}

fn check_entry(raw: &RawActivity) -> std::result::Result<CropActivity, String> {
    let crop = normalize_crop(&raw.crop);
    if crop.is_empty() {
        return Err("crop type is empty".to_string());
    }

    let category: ActivityCategory = raw.activity.parse().map_err(reason_of)?;

    if !raw.quantity.is_finite() {
        return Err(format!("quantity {} is not a finite number", raw.quantity));
    }
    if raw.quantity < 0.0 {
        return Err(format!("quantity {} is negative", raw.quantity));
    }

    let unit: Unit = raw.unit.parse().map_err(reason_of)?;

    let expected = category.expected_unit();
    if unit != expected {
        return Err(format!(
            "{} must be recorded in {}, got {}",
            category, expected, unit
        ));
    }

    // Normalize -0.0 so it prints and sums as zero.
    let quantity = if raw.quantity == 0.0 { 0.0 } else { raw.quantity };

    Ok(CropActivity::new(crop, category, quantity, unit))
}

/// Validate a single entry. `index` is its zero-based position in the submission.
pub fn validate_entry(index: usize, raw: &RawActivity) -> Result<CropActivity> {
    check_entry(raw).map_err(|reason| FootprintError::InvalidActivityInput { index, reason })
}

/// Validate every entry, failing on the first invalid one.
pub fn collect(entries: &[RawActivity]) -> Result<Vec<CropActivity>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, raw)| validate_entry(i, raw))
        .collect()
}

/// Validate every entry, keeping the valid ones and reporting each invalid one.
pub fn collect_partitioned(entries: &[RawActivity]) -> Collected {
    let mut collected = Collected::default();

    for (index, raw) in entries.iter().enumerate() {
        match check_entry(raw) {
            Ok(activity) => collected.accepted.push(activity),
            Err(reason) => {
                tracing::debug!(index, %reason, "rejected activity entry");
                collected.rejected.push(Rejection {
                    index,
                    entry: raw.clone(),
                    reason,
                });
            }
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_entry_is_normalized() {
        let activity = validate_entry(0, &RawActivity::new(" Wheat ", "Fuel", 20.0, "litres")).unwrap();
        assert_eq!(activity.crop(), "wheat");
        assert_eq!(activity.category(), ActivityCategory::Fuel);
        assert_eq!(activity.unit(), Unit::Litre);
        assert_eq!(activity.quantity(), 20.0);
    }

    #[test]
    fn test_zero_quantity_accepted() {
        let activity = validate_entry(0, &RawActivity::new("wheat", "seed", 0.0, "kg")).unwrap();
        assert_eq!(activity.quantity(), 0.0);

        let negative_zero = validate_entry(0, &RawActivity::new("wheat", "seed", -0.0, "kg")).unwrap();
        assert!(negative_zero.quantity().is_sign_positive());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = validate_entry(3, &RawActivity::new("wheat", "fuel", -1.0, "L")).unwrap_err();
        assert!(matches!(err, FootprintError::InvalidActivityInput { index: 3, .. }));
    }

    #[test]
    fn test_nan_quantity_rejected() {
        let err = validate_entry(0, &RawActivity::new("wheat", "fuel", f64::NAN, "L")).unwrap_err();
        assert!(matches!(err, FootprintError::InvalidActivityInput { .. }));
    }

    #[test]
    fn test_unit_mismatch_rejected() {
        let err = validate_entry(1, &RawActivity::new("wheat", "fuel", 20.0, "kg")).unwrap_err();
        match err {
            FootprintError::InvalidActivityInput { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("fuel must be recorded in L"), "{}", reason);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_category_and_unit_rejected() {
        assert!(validate_entry(0, &RawActivity::new("wheat", "ploughing", 1.0, "kg")).is_err());
        assert!(validate_entry(0, &RawActivity::new("wheat", "fuel", 1.0, "gallon")).is_err());
        assert!(validate_entry(0, &RawActivity::new("  ", "fuel", 1.0, "L")).is_err());
    }

    #[test]
    fn test_collect_fails_on_first_invalid() {
        let entries = vec![
            RawActivity::new("wheat", "fertilizer", 100.0, "kg"),
            RawActivity::new("wheat", "fuel", -5.0, "L"),
            RawActivity::new("wheat", "fuel", 10.0, "kg"),
        ];
        let err = collect(&entries).unwrap_err();
        assert!(matches!(err, FootprintError::InvalidActivityInput { index: 1, .. }));
    }

    #[test]
    fn test_collect_partitioned_keeps_valid_entries() {
        let entries = vec![
            RawActivity::new("wheat", "fertilizer", 100.0, "kg"),
            RawActivity::new("wheat", "fuel", -5.0, "L"),
            RawActivity::new("wheat", "fuel", 20.0, "L"),
        ];
        let collected = collect_partitioned(&entries);
        assert!(!collected.is_clean());
        assert_eq!(collected.accepted.len(), 2);
        assert_eq!(collected.rejected.len(), 1);
        assert_eq!(collected.rejected[0].index, 1);
        assert_eq!(collected.accepted[1].quantity(), 20.0);
    }
}
