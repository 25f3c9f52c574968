//! Error types for batch runs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a batch or its output
///
/// Per-document problems never appear here; they are recorded as
/// failures in the batch outcome instead.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The input root does not exist or is not a directory
    #[error("Input root not found: {}", .0.display())]
    InputRootMissing(PathBuf),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pipeline could not be constructed
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] covenant_extractor::ExtractorError),
}
