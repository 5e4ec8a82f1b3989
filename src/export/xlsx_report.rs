use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::export::{ALL_CROPS_LABEL, COLUMNS, REPORT_TITLE, TOTAL_LABEL};
use crate::models::{FOOTPRINT_UNIT, Report};

const COLUMN_WIDTHS: [f64; 8] = [14.0, 10.0, 14.0, 12.0, 8.0, 12.0, 22.0, 40.0];

/// Render a report as an XLSX workbook in memory.
///
/// Sheet `Footprint` mirrors the CSV rows with numeric cells; sheet `Report`
/// holds the metadata.
pub fn build_workbook(report: &Report) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    workbook.push_worksheet(footprint_sheet(report)?);
    workbook.push_worksheet(metadata_sheet(report)?);
    workbook.save_to_buffer()
}

fn footprint_sheet(report: &Report) -> Result<Worksheet, XlsxError> {
    let bold = Format::new().set_bold();
    let mut sheet = Worksheet::new();
    sheet.set_name("Footprint")?;

    for (col, (name, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *name, &bold)?;
        sheet.set_column_width(col, width)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    let mut row: u32 = 1;
    for result in &report.results {
        for c in &result.contributions {
            sheet.write_string(row, 0, &result.crop)?;
            sheet.write_string(row, 1, result.scope.code())?;
            sheet.write_string(row, 2, c.activity.code())?;
            sheet.write_number(row, 3, c.quantity)?;
            sheet.write_string(row, 4, c.unit.symbol())?;
            sheet.write_number(row, 5, c.factor)?;
            sheet.write_number(row, 6, c.contribution)?;
            sheet.write_string(row, 7, &c.source)?;
            row += 1;
        }

        sheet.write_string_with_format(row, 0, &result.crop, &bold)?;
        sheet.write_string_with_format(row, 1, result.scope.code(), &bold)?;
        sheet.write_string_with_format(row, 2, TOTAL_LABEL, &bold)?;
        sheet.write_number_with_format(row, 6, result.total, &bold)?;
        row += 1;
    }

    if report.results.len() > 1 {
        sheet.write_string_with_format(row, 0, ALL_CROPS_LABEL, &bold)?;
        sheet.write_string_with_format(row, 1, report.scope.code(), &bold)?;
        sheet.write_string_with_format(row, 2, TOTAL_LABEL, &bold)?;
        sheet.write_number_with_format(row, 6, report.grand_total(), &bold)?;
    }

    Ok(sheet)
}

fn metadata_sheet(report: &Report) -> Result<Worksheet, XlsxError> {
    let bold = Format::new().set_bold();
    let mut sheet = Worksheet::new();
    sheet.set_name("Report")?;
    sheet.set_column_width(0, 18)?;
    sheet.set_column_width(1, 40)?;

    let generated_at = report.generated_at.to_rfc3339();
    let crops = report.results.len().to_string();
    let standard = report.scope.to_string();
    let rows: [(&str, &str); 6] = [
        ("Report", REPORT_TITLE),
        ("Generated at", generated_at.as_str()),
        ("Standard", standard.as_str()),
        ("Dataset version", report.dataset_version.as_str()),
        ("Crops", crops.as_str()),
        ("Unit", FOOTPRINT_UNIT),
    ];

    for (row, (label, value)) in rows.iter().enumerate() {
        let row = row as u32;
        sheet.write_string_with_format(row, 0, *label, &bold)?;
        sheet.write_string(row, 1, *value)?;
    }

    Ok(sheet)
}
