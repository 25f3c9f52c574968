//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while turning a document into a record
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Narrative provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Narrative call exceeded its time budget
    #[error("Enrichment timeout after {0}s")]
    Timeout(u64),

    /// Narrative response has no usable structured block
    #[error("Invalid enrichment format: {0}")]
    InvalidFormat(String),

    /// Assembled draft failed the schema check
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Blocking extraction task did not complete
    #[error("Extraction task failed: {0}")]
    Task(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

impl From<covenant_llm::LlmError> for ExtractorError {
    fn from(e: covenant_llm::LlmError) -> Self {
        ExtractorError::Llm(e.to_string())
    }
}
