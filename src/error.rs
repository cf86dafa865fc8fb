//! Error types for the explorer

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The path does not carry one of the indexed extensions
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFile(PathBuf),

    #[error("Failed to open {}: {reason}", .path.display())]
    OpenError { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
