//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use async_trait::async_trait;

/// Trait for narrative generation
///
/// Implemented by the infrastructure layer (covenant-llm). Output is
/// untrusted free text; callers parse and validate it before use.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for generation calls
    type Error: std::fmt::Display + Send;

    /// Generate a text completion for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Model name, recorded on narratives produced by this provider
    fn model_name(&self) -> &str;
}
