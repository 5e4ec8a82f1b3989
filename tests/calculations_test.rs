use assert_float_eq::*;

use farm_footprint_rs::calculator::{FootprintCalculator, StandardCalculator};
use farm_footprint_rs::collector::collect;
use farm_footprint_rs::error::FootprintError;
use farm_footprint_rs::factors::EmissionFactorTable;
use farm_footprint_rs::models::{ActivityCategory, EmissionFactor, RawActivity, Scope};

fn make_factor(crop: &str, activity: ActivityCategory, coefficient: f64) -> EmissionFactor {
    EmissionFactor {
        crop: crop.to_string(),
        activity,
        scope: Scope::Ipcc,
        coefficient,
        unit: activity.expected_unit(),
        source: "integration test".to_string(),
    }
}

fn sample_table() -> EmissionFactorTable {
    EmissionFactorTable::new(
        "integration-v1",
        vec![
            make_factor("wheat", ActivityCategory::Fertilizer, 2.5),
            make_factor("wheat", ActivityCategory::Fuel, 3.0),
            make_factor("wheat", ActivityCategory::Seed, 0.4),
            make_factor("maize", ActivityCategory::Fuel, 2.68),
            make_factor("maize", ActivityCategory::Fertilizer, 1.1),
        ],
    )
    .unwrap()
}

#[test]
fn test_wheat_example_total() {
    let table = sample_table();
    let calc = StandardCalculator::new(&table);
    let activities = collect(&[
        RawActivity::new("wheat", "fertilizer", 100.0, "kg"),
        RawActivity::new("wheat", "fuel", 20.0, "L"),
    ])
    .unwrap();

    let result = calc.calculate("wheat", &activities, Scope::Ipcc).unwrap();

    let contributions: Vec<f64> = result.contributions.iter().map(|c| c.contribution).collect();
    assert_eq!(contributions, vec![250.0, 60.0]);
    assert_eq!(result.total, 310.0);
    assert_eq!(result.unit(), "kg CO2e");
}

#[test]
fn test_maize_irrigation_without_factor_fails() {
    let table = sample_table();
    let calc = StandardCalculator::new(&table);
    let activities = collect(&[RawActivity::new("maize", "irrigation", 50.0, "m3")]).unwrap();

    let err = calc.calculate("maize", &activities, Scope::Ipcc).unwrap_err();
    match err {
        FootprintError::FactorNotFound {
            crop,
            activity,
            scope,
        } => {
            assert_eq!(crop, "maize");
            assert_eq!(activity, ActivityCategory::Irrigation);
            assert_eq!(scope, Scope::Ipcc);
        }
        other => panic!("expected FactorNotFound, got {}", other),
    }
}

#[test]
fn test_missing_factor_anywhere_fails_whole_crop() {
    let table = sample_table();
    let calc = StandardCalculator::new(&table);
    let activities = collect(&[
        RawActivity::new("maize", "fuel", 10.0, "L"),
        RawActivity::new("maize", "irrigation", 50.0, "m3"),
        RawActivity::new("maize", "fertilizer", 40.0, "kg"),
    ])
    .unwrap();

    assert!(matches!(
        calc.calculate("maize", &activities, Scope::Ipcc),
        Err(FootprintError::FactorNotFound { .. })
    ));
}

#[test]
fn test_wrong_scope_is_factor_not_found() {
    let table = sample_table();
    let calc = StandardCalculator::new(&table);
    let activities = collect(&[RawActivity::new("wheat", "fuel", 1.0, "L")]).unwrap();

    assert!(matches!(
        calc.calculate("wheat", &activities, Scope::Pas2050),
        Err(FootprintError::FactorNotFound { scope: Scope::Pas2050, .. })
    ));
}

#[test]
fn test_zero_quantity_contributes_zero() {
    let table = sample_table();
    let calc = StandardCalculator::new(&table);
    let activities = collect(&[
        RawActivity::new("wheat", "seed", 0.0, "kg"),
        RawActivity::new("wheat", "fuel", 20.0, "L"),
    ])
    .unwrap();

    let result = calc.calculate("wheat", &activities, Scope::Ipcc).unwrap();
    assert_eq!(result.contributions[0].contribution, 0.0);
    assert_eq!(result.total, 60.0);
}

#[test]
fn test_negative_quantity_rejected_before_calculation() {
    let err = collect(&[RawActivity::new("wheat", "fuel", -20.0, "L")]).unwrap_err();
    assert!(matches!(err, FootprintError::InvalidActivityInput { index: 0, .. }));
}

#[test]
fn test_total_is_in_order_sum_of_contributions() {
    let table = sample_table();
    let calc = StandardCalculator::new(&table);
    let quantities = [0.1, 12.7, 3.333, 1e6, 0.0, 42.0, 7.77];
    let entries: Vec<RawActivity> = quantities
        .iter()
        .enumerate()
        .map(|(i, q)| {
            if i % 2 == 0 {
                RawActivity::new("maize", "fuel", *q, "L")
            } else {
                RawActivity::new("maize", "fertilizer", *q, "kg")
            }
        })
        .collect();
    let activities = collect(&entries).unwrap();

    let result = calc.calculate("maize", &activities, Scope::Ipcc).unwrap();

    let mut expected = 0.0;
    for (i, q) in quantities.iter().enumerate() {
        let factor = if i % 2 == 0 { 2.68 } else { 1.1 };
        expected += q * factor;
    }
    assert_eq!(result.total, expected);

    // Same input, same bits.
    let again = calc.calculate("maize", &activities, Scope::Ipcc).unwrap();
    assert_eq!(again.total.to_bits(), result.total.to_bits());
}

#[test]
fn test_calculate_all_groups_crops() {
    let table = sample_table();
    let calc = StandardCalculator::new(&table);
    let activities = collect(&[
        RawActivity::new("wheat", "fertilizer", 100.0, "kg"),
        RawActivity::new("maize", "fuel", 10.0, "L"),
        RawActivity::new("wheat", "fuel", 20.0, "L"),
    ])
    .unwrap();

    let results = calc.calculate_all(&activities, Scope::Ipcc).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].crop, "wheat");
    assert_eq!(results[0].total, 310.0);
    assert_eq!(results[1].crop, "maize");
    assert_float_absolute_eq!(results[1].total, 26.8, 1e-9);
}
