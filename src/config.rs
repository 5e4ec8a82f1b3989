use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export::ExportFormat;
use crate::models::Scope;

const APP_NAME: &str = "farm-footprint";
const CONFIG_FILE: &str = "config.json";

/// Default emission factor dataset, relative to the working directory.
/// Matches the dataset bundled under `data/`.
pub const DEFAULT_FACTORS_FILE: &str = "data/emission_factors.json";

/// Defaults for the command line, read from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Emission factor dataset (JSON or CSV).
    pub factors: PathBuf,
    /// Accounting standard used when `--scope` is not given.
    pub scope: Scope,
    /// Export format used when it cannot be inferred from the output path.
    pub format: ExportFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            factors: PathBuf::from(DEFAULT_FACTORS_FILE),
            scope: Scope::default(),
            format: ExportFormat::Csv,
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the user config
    /// directory is tried; a missing file gives defaults and a broken one is
    /// logged and replaced by defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        match Self::load_from(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load config, using defaults: {}", e);
                Ok(Self::default())
            }
        }
    }

    /// Read a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// `<config_dir>/farm-footprint/config.json`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"scope": "pas2050"}"#).unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.scope, Scope::Pas2050);
        assert_eq!(config.factors, PathBuf::from(DEFAULT_FACTORS_FILE));
        assert_eq!(config.format, ExportFormat::Csv);
    }

    #[test]
    fn test_default_factors_is_bundled_dataset() {
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_FACTORS_FILE);
        assert!(bundled.is_file());
        assert_eq!(AppConfig::default().factors, PathBuf::from(DEFAULT_FACTORS_FILE));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.json"))).is_err());
    }

    #[test]
    fn test_explicit_invalid_json_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        assert!(AppConfig::load(Some(file.path())).is_err());
    }
}
