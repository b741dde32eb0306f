use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error {status} for {url}\n{details}")]
    Api {
        status: u16,
        url: String,
        details: String,
    },

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Export file not found at '{}'. Run the export first.", .0.display())]
    ExportFileMissing(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MigrateError {
    /// True for errors raised by a single API call (HTTP status or
    /// transport failure). These are the errors the iterative import
    /// strategies isolate per item instead of aborting the run.
    pub fn is_api_error(&self) -> bool {
        matches!(self, MigrateError::Api { .. } | MigrateError::Request { .. })
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;
