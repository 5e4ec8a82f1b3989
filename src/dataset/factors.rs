use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{FootprintError, Result};
use crate::factors::{EmissionFactorTable, FactorSource};
use crate::models::{ActivityCategory, EmissionFactor, Scope, Unit};

/// One factor as it appears in a dataset file.
#[derive(Debug, Deserialize)]
struct FactorRecord {
    crop: String,
    activity: String,
    scope: String,
    coefficient: f64,
    unit: String,
    #[serde(default)]
    source: String,
}

#[derive(Debug, Deserialize)]
struct FactorDataset {
    version: String,
    factors: Vec<FactorRecord>,
}

impl FactorRecord {
    fn into_factor(self, index: usize) -> Result<EmissionFactor> {
        let invalid = |e: FootprintError| {
            FootprintError::InvalidDataset(format!("record {}: {}", index, e))
        };

        Ok(EmissionFactor {
            activity: self.activity.parse::<ActivityCategory>().map_err(invalid)?,
            scope: self.scope.parse::<Scope>().map_err(invalid)?,
            unit: self.unit.parse::<Unit>().map_err(invalid)?,
            crop: self.crop,
            coefficient: self.coefficient,
            source: self.source.trim().to_string(),
        })
    }
}

fn build_table(version: &str, records: Vec<FactorRecord>) -> Result<EmissionFactorTable> {
    let factors = records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_factor(i))
        .collect::<Result<Vec<_>>>()?;

    EmissionFactorTable::new(version, factors)
}

/// Load an emission factor table, picking the format from the file extension.
///
/// `.csv` files carry no version field, so the file stem is used instead.
pub fn load_factor_table<P: AsRef<Path>>(path: P) -> Result<EmissionFactorTable> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let table = match extension.as_deref() {
        Some("csv") => {
            let version = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unversioned");
            load_factors_csv(path, version)?
        }
        _ => load_factors_json(path)?,
    };

    tracing::info!(
        path = %path.display(),
        version = %table.version(),
        factors = table.len(),
        "loaded emission factor dataset"
    );

    Ok(table)
}

/// Load a versioned JSON factor dataset.
pub fn load_factors_json<P: AsRef<Path>>(path: P) -> Result<EmissionFactorTable> {
    let content = fs::read_to_string(path)?;
    parse_factors_json(&content)
}

/// Parse a versioned JSON factor dataset.
pub fn parse_factors_json(content: &str) -> Result<EmissionFactorTable> {
    let dataset: FactorDataset = serde_json::from_str(content)?;

    if dataset.version.trim().is_empty() {
        return Err(FootprintError::InvalidDataset(
            "dataset version is empty".to_string(),
        ));
    }

    build_table(dataset.version.trim(), dataset.factors)
}

/// Load a CSV factor dataset with header `crop,activity,scope,coefficient,unit,source`.
pub fn load_factors_csv<P: AsRef<Path>>(path: P, version: &str) -> Result<EmissionFactorTable> {
    let file = fs::File::open(path)?;
    read_factors_csv(file, version)
}

/// Read a CSV factor dataset from any reader.
///
/// Lines starting with `#` are comments, as in activity input files.
pub fn read_factors_csv<R: Read>(reader: R, version: &str) -> Result<EmissionFactorTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut records = Vec::new();
    for record in rdr.deserialize() {
        let record: FactorRecord = record?;
        records.push(record);
    }

    build_table(version, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_JSON: &str = r#"{
        "version": "ipcc-2019-v1",
        "factors": [
            {"crop": "Wheat", "activity": "fertilizer", "scope": "ipcc", "coefficient": 2.5, "unit": "kg", "source": "IPCC 2019 Refinement, Vol. 4 Ch. 11"},
            {"crop": "wheat", "activity": "fuel_combustion", "scope": "IPCC", "coefficient": 3.0, "unit": "L", "source": "IPCC 2006 Vol. 2 Ch. 3"}
        ]
    }"#;

    #[test]
    fn test_parse_json_dataset() {
        let table = parse_factors_json(SAMPLE_JSON).unwrap();
        assert_eq!(table.version(), "ipcc-2019-v1");
        assert_eq!(table.len(), 2);

        let fuel = table
            .lookup("wheat", ActivityCategory::Fuel, Scope::Ipcc)
            .unwrap();
        assert_eq!(fuel.coefficient, 3.0);
        assert_eq!(fuel.source, "IPCC 2006 Vol. 2 Ch. 3");
    }

    #[test]
    fn test_load_json_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(SAMPLE_JSON.as_bytes()).unwrap();

        let table = load_factor_table(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_csv_uses_file_stem_as_version() {
        let csv = "\
# crop,activity,scope,coefficient,unit,source
crop,activity,scope,coefficient,unit,source
wheat, fertilizer, ipcc, 2.5, kg, IPCC 2019
wheat, fuel, pas2050, 3.1, litre, PAS 2050:2011
";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factors-2024.csv");
        fs::write(&path, csv).unwrap();

        let table = load_factor_table(&path).unwrap();
        assert_eq!(table.version(), "factors-2024");
        assert_eq!(table.len(), 2);
        let pas = table
            .lookup("wheat", ActivityCategory::Fuel, Scope::Pas2050)
            .unwrap();
        assert_eq!(pas.coefficient, 3.1);
    }

    #[test]
    fn test_unknown_activity_is_invalid_dataset() {
        let json = r#"{"version": "v1", "factors": [
            {"crop": "wheat", "activity": "harvest", "scope": "ipcc", "coefficient": 1.0, "unit": "kg"}
        ]}"#;
        let result = parse_factors_json(json);
        assert!(matches!(result, Err(FootprintError::InvalidDataset(_))));
    }

    #[test]
    fn test_empty_version_rejected() {
        let json = r#"{"version": "  ", "factors": []}"#;
        assert!(matches!(
            parse_factors_json(json),
            Err(FootprintError::InvalidDataset(_))
        ));
    }
}
