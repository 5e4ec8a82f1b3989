use std::path::PathBuf;

use thiserror::Error;

use crate::models::{ActivityCategory, Scope};

#[derive(Debug, Error)]
pub enum FootprintError {
    #[error("Invalid activity input (entry {}): {reason}", .index + 1)]
    InvalidActivityInput { index: usize, reason: String },

    #[error("No emission factor for crop '{crop}', activity '{activity}', scope {scope}")]
    FactorNotFound {
        crop: String,
        activity: ActivityCategory,
        scope: Scope,
    },

    #[error("Export to {} failed: {reason}", .path.display())]
    ExportIo { path: PathBuf, reason: String },

    #[error("Invalid emission factor dataset: {0}")]
    InvalidDataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FootprintError {
    pub(crate) fn export_io(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        FootprintError::ExportIo {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FootprintError>;
