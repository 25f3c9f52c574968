//! Covenant LLM Provider Layer
//!
//! Pluggable narrative-generation providers used by the enrichment step.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `covenant-domain`. Every provider makes at most one attempt per call;
//! there is no retry or backoff, a failed call is left to the caller's
//! fallback path.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//! - `GeminiProvider`: Google Generative Language API
//!
//! # Examples
//!
//! ```
//! use covenant_llm::MockProvider;
//! use covenant_domain::traits::LlmProvider;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"key_features": ["Cashless claims"]}"#);
//! let reply = provider.generate("Describe this Health Plan").await.unwrap();
//! assert!(reply.starts_with('{'));
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod ollama;

use async_trait::async_trait;
use covenant_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider is missing required configuration (endpoint, API key)
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Scripted provider for tests
///
/// Answers every prompt with the same reply (or the same failure) and
/// remembers the last prompt it saw. Clones share their counters, so a test
/// can hand a clone to the pipeline and inspect the original afterwards.
///
/// # Examples
///
/// ```
/// use covenant_llm::MockProvider;
///
/// let provider = MockProvider::new(r#"{"key_features": ["Level cover"]}"#);
/// assert_eq!(provider.call_count(), 0);
/// assert!(provider.last_prompt().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    reply: String,
    fail_all: bool,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    /// Provider answering every prompt with `reply`
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail_all: false,
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Provider whose every call fails with a communication error
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::new("")
        }
    }

    /// Sleep before answering, to exercise caller timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls made so far, failed ones included
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The most recent prompt, if any call was made
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self
            .last_prompt
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_all {
            return Err(LlmError::Communication("mock provider configured to fail".to_string()));
        }
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
