mod csv_report;
mod xlsx_report;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{FootprintError, Result};
use crate::models::Report;

pub use csv_report::{read_csv, write_csv};
pub use xlsx_report::build_workbook;

/// Report columns, shared by CSV and XLSX output.
pub const COLUMNS: [&str; 8] = [
    "crop",
    "scope",
    "activity",
    "quantity",
    "unit",
    "factor",
    "contribution_kg_co2e",
    "source",
];

/// Activity label of a totals row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// Crop label of the grand-total row.
pub const ALL_CROPS_LABEL: &str = "ALL";

pub const REPORT_TITLE: &str = "Cradle-to-farm-gate carbon footprint report";

/// Tabular output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        extension.parse()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(FootprintError::InvalidInput(format!(
                "Unsupported export format '{}' (expected csv or xlsx)",
                other
            ))),
        }
    }
}

/// Decide the output path and format.
///
/// An explicit format wins; otherwise the extension decides. A path without
/// an extension gets the fallback format and its extension.
pub fn resolve_output(
    path: &Path,
    explicit: Option<ExportFormat>,
    fallback: ExportFormat,
) -> Result<(PathBuf, ExportFormat)> {
    if let Some(format) = explicit {
        return Ok((path.to_path_buf(), format));
    }

    if path.extension().is_none() {
        return Ok((path.with_extension(fallback.extension()), fallback));
    }

    Ok((path.to_path_buf(), ExportFormat::from_path(path)?))
}

/// Write `contents` to `path` through a temporary file in the same directory.
///
/// The destination only appears once everything is written; on failure the
/// temporary file is removed and any existing file at `path` is untouched.
fn write_atomically<F>(path: &Path, contents: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(|e| FootprintError::export_io(path, e))?;

    {
        let mut writer = BufWriter::new(tmp.as_file());
        contents(&mut writer).map_err(|e| FootprintError::export_io(path, e))?;
        writer
            .flush()
            .map_err(|e| FootprintError::export_io(path, e))?;
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| FootprintError::export_io(path, e))?;
    tmp.persist(path)
        .map_err(|e| FootprintError::export_io(path, e.error))?;
    Ok(())
}

/// Export a report to `path` in the given format.
pub fn export_report(report: &Report, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => write_atomically(path, |out| write_csv(report, out))?,
        ExportFormat::Xlsx => {
            let bytes = build_workbook(report).map_err(|e| FootprintError::export_io(path, e))?;
            write_atomically(path, |out| Ok(out.write_all(&bytes)?))?;
        }
    }

    tracing::info!(
        path = %path.display(),
        %format,
        crops = report.results.len(),
        "exported footprint report"
    );
    Ok(())
}

/// Export a report, choosing the format from the file extension.
pub fn export_report_auto(report: &Report, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    export_report(report, path, format)?;
    Ok(format)
}
