// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Download failed for {url}: {message}")]
    Download { url: String, message: String },

    #[error("Text extraction failed for {document}: {message}")]
    Extraction { document: String, message: String },

    #[error("Invalid heading pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Mail delivery failed: {0}")]
    Delivery(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MonitorError {
    pub fn extraction(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            document: document.into(),
            message: message.into(),
        }
    }
}
