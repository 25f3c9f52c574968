//! Google Gemini provider
//!
//! Calls the Generative Language `generateContent` endpoint with a single
//! text part. Requires an API key, normally taken from `GEMINI_API_KEY`.

use crate::LlmError;
use async_trait::async_trait;
use covenant_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key; the key never appears in the URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Default timeout for requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Gemini API provider
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiProvider {
    /// Create a provider with an explicit API key
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(api_key, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider with an explicit API key and request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured(format!("{} is empty", API_KEY_ENV)));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: model.into(),
            client,
        })
    }

    /// Create a provider with the key read from `GEMINI_API_KEY`
    pub fn from_env(model: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| LlmError::NotConfigured(format!("{} not set", API_KEY_ENV)))?;
        Self::with_timeout(api_key, model, timeout)
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

fn first_text(response: GeminiResponse) -> Result<String, LlmError> {
    if let Some(error) = response.error {
        return Err(LlmError::InvalidResponse(error.message));
    }
    response
        .candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
        .ok_or_else(|| LlmError::InvalidResponse("No text in response".to_string()))
}

#[async_trait]
impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: 0.2,
                max_output_tokens: 2048,
            },
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "Calling Gemini");

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e.without_url())))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)));
        }

        let body = response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e.without_url())))?;
        first_text(body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
