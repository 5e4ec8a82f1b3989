use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::models::RawActivity;

/// Load raw activity entries from a CSV file with header `crop,activity,quantity,unit`.
///
/// Entries are returned in file order and are not validated here.
pub fn load_activities<P: AsRef<Path>>(path: P) -> Result<Vec<RawActivity>> {
    let file = fs::File::open(path)?;
    read_activities(file)
}

/// Read raw activity entries from any CSV reader.
///
/// Lines starting with `#` are comments; a crop code that starts with `#`
/// must be quoted.
pub fn read_activities<R: Read>(reader: R) -> Result<Vec<RawActivity>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut entries = Vec::new();
    for record in rdr.deserialize() {
        let entry: RawActivity = record?;
        entries.push(entry);
    }

    tracing::debug!(entries = entries.len(), "read activity entries");
    Ok(entries)
}
