use crate::collector::Rejection;
use crate::models::{EmissionFactor, FOOTPRINT_UNIT, FootprintResult};

/// Display one crop's footprint with its per-activity breakdown.
pub fn display_footprint(result: &FootprintResult) {
    println!();
    println!("=== {} ({}) ===", result.crop, result.scope);
    println!();

    if result.is_empty() {
        println!("  (no activities)");
    }

    for (i, c) in result.contributions.iter().enumerate() {
        let amount = format!("{} {}", c.quantity, c.unit);
        println!(
            "{:>3}. {:<12} {:>12} x {:>8} kg CO2e/{:<3} = {:>12.2} {}",
            i + 1,
            c.activity.code(),
            amount,
            c.factor,
            c.unit.symbol(),
            c.contribution,
            FOOTPRINT_UNIT
        );
    }

    println!();
    println!("Total: {:.2} {}", result.total, result.unit());
}

/// Display all results followed by a summary.
pub fn display_results(results: &[FootprintResult]) {
    if results.is_empty() {
        println!("No footprint computed (no activities entered).");
        return;
    }

    for result in results {
        display_footprint(result);
    }

    if results.len() > 1 {
        let mut grand_total = 0.0;
        for result in results {
            grand_total += result.total;
        }

        println!();
        println!("--- Summary ---");
        println!("Crops: {}", results.len());
        println!("Grand total: {:.2} {}", grand_total, FOOTPRINT_UNIT);
    }
    println!();
}

/// Display the factor table.
pub fn display_factors(factors: &[&EmissionFactor], version: &str) {
    if factors.is_empty() {
        println!("No emission factors (dataset {}).", version);
        return;
    }

    println!();
    println!("=== Emission factors, dataset {} ({} entries) ===", version, factors.len());
    println!();

    let crop_width = factors.iter().map(|f| f.crop.len()).max().unwrap_or(4).max(4);

    for f in factors {
        println!(
            "  {:<width$}  {:<12} {:<9} {:>10} {:<14} {}",
            f.crop,
            f.activity.code(),
            f.scope.to_string(),
            f.coefficient,
            f.coefficient_unit(),
            f.source,
            width = crop_width
        );
    }

    println!();
}

/// Display entries the collector refused.
pub fn display_rejections(rejections: &[Rejection]) {
    if rejections.is_empty() {
        return;
    }

    eprintln!("{} entr{} rejected:", rejections.len(), if rejections.len() == 1 { "y" } else { "ies" });
    for r in rejections {
        eprintln!(
            "  entry {} ({}, {}, {} {}): {}",
            r.index + 1,
            r.entry.crop,
            r.entry.activity,
            r.entry.quantity,
            r.entry.unit,
            r.reason
        );
    }
}
