use std::io::{Read, Write};

use crate::error::{FootprintError, Result};
use crate::export::{ALL_CROPS_LABEL, COLUMNS, REPORT_TITLE, TOTAL_LABEL};
use crate::models::{Contribution, FootprintResult, Report, Scope};

/// Write a report as CSV.
///
/// Two `#` comment lines carry the metadata, then one row per contribution
/// and a totals row per crop. Reports with several crops end with an `ALL`
/// grand-total row. Numbers use the shortest form that parses back exactly.
pub fn write_csv<W: Write>(report: &Report, mut out: W) -> Result<()> {
    writeln!(out, "# {}", REPORT_TITLE)?;
    writeln!(
        out,
        "# generated_at={} standard={} dataset={}",
        report.generated_at.to_rfc3339(),
        report.scope,
        report.dataset_version
    )?;

    // Crop codes starting with the comment character must be quoted.
    let mut wtr = csv::WriterBuilder::new()
        .comment(Some(b'#'))
        .from_writer(out);
    wtr.write_record(COLUMNS)?;

    for result in &report.results {
        for c in &result.contributions {
            wtr.write_record([
                result.crop.as_str(),
                result.scope.code(),
                c.activity.code(),
                c.quantity.to_string().as_str(),
                c.unit.symbol(),
                c.factor.to_string().as_str(),
                c.contribution.to_string().as_str(),
                c.source.as_str(),
            ])?;
        }

        wtr.write_record([
            result.crop.as_str(),
            result.scope.code(),
            TOTAL_LABEL,
            "",
            "",
            "",
            result.total.to_string().as_str(),
            "",
        ])?;
    }

    if report.results.len() > 1 {
        wtr.write_record([
            ALL_CROPS_LABEL,
            report.scope.code(),
            TOTAL_LABEL,
            "",
            "",
            "",
            report.grand_total().to_string().as_str(),
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn parse_number(field: &str, line: u64, column: &str) -> Result<f64> {
    field.parse::<f64>().map_err(|_| {
        FootprintError::InvalidInput(format!(
            "line {}: {} '{}' is not a number",
            line, column, field
        ))
    })
}

/// Parse a CSV report written by [`write_csv`] back into footprint results.
///
/// The grand-total row is skipped; every crop must be closed by its totals row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<FootprintResult>> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.iter().ne(COLUMNS.iter().copied()) {
        return Err(FootprintError::InvalidInput(format!(
            "unexpected report columns: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut results = Vec::new();
    let mut pending: Option<FootprintResult> = None;

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |i: usize| record.get(i).unwrap_or("");

        let crop = field(0);
        let scope: Scope = field(1).parse()?;

        if field(2) == TOTAL_LABEL {
            if crop == ALL_CROPS_LABEL {
                continue;
            }

            let mut result = pending.take().unwrap_or_else(|| FootprintResult {
                crop: crop.to_string(),
                scope,
                contributions: Vec::new(),
                total: 0.0,
            });

            if result.crop != crop || result.scope != scope {
                return Err(FootprintError::InvalidInput(format!(
                    "line {}: totals row for '{}' closes rows of '{}'",
                    line, crop, result.crop
                )));
            }

            result.total = parse_number(field(6), line, "total")?;
            results.push(result);
            continue;
        }

        let contribution = Contribution {
            activity: field(2).parse()?,
            quantity: parse_number(field(3), line, "quantity")?,
            unit: field(4).parse()?,
            factor: parse_number(field(5), line, "factor")?,
            contribution: parse_number(field(6), line, "contribution")?,
            source: field(7).to_string(),
        };

        match pending.as_mut() {
            Some(result) if result.crop == crop && result.scope == scope => {
                result.contributions.push(contribution);
            }
            Some(result) => {
                return Err(FootprintError::InvalidInput(format!(
                    "line {}: '{}' has no totals row before '{}' starts",
                    line, result.crop, crop
                )));
            }
            None => {
                pending = Some(FootprintResult {
                    crop: crop.to_string(),
                    scope,
                    contributions: vec![contribution],
                    total: 0.0,
                });
            }
        }
    }

    if let Some(result) = pending {
        return Err(FootprintError::InvalidInput(format!(
            "'{}' has no totals row",
            result.crop
        )));
    }

    Ok(results)
}
