//! Configuration for the per-document pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which field extractors run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorSetKind {
    /// Premium, coverage, eligibility, riders and exclusions
    #[default]
    Basic,
    /// Basic plus terms, identity, structure and cadence extractors
    Extended,
}

/// Narrative provider backing the enrichment step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// No provider; every record uses the template narrative
    #[default]
    None,
    /// Local Ollama instance
    Ollama,
    /// Google Gemini (API key from `GEMINI_API_KEY`)
    Gemini,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(ProviderKind::None),
            "ollama" => Ok(ProviderKind::Ollama),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(format!("unknown provider '{}' (expected none, ollama or gemini)", other)),
        }
    }
}

/// Configuration for the enrichment step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Provider to call
    pub provider: ProviderKind,

    /// Provider endpoint (Ollama only)
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Characters of recovered text embedded in the prompt
    pub excerpt_chars: usize,

    /// Time budget for one call (seconds)
    pub timeout_secs: u64,
}

impl EnrichmentConfig {
    /// Get the call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::None,
            endpoint: covenant_llm::ollama::DEFAULT_ENDPOINT.to_string(),
            model: covenant_llm::gemini::DEFAULT_MODEL.to_string(),
            excerpt_chars: 3_000,
            timeout_secs: 60,
        }
    }
}

/// Configuration for the per-document pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Field extractors to run
    pub extractor_set: ExtractorSetKind,

    /// Minimum length of a printable byte run kept by the last-resort scan
    pub min_printable_run: usize,

    /// Characters of recovered text kept as the record's snippet
    pub snippet_chars: usize,

    /// Enrichment settings
    pub enrichment: EnrichmentConfig,
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_printable_run == 0 {
            return Err("min_printable_run must be greater than 0".to_string());
        }
        if self.snippet_chars == 0 {
            return Err("snippet_chars must be greater than 0".to_string());
        }
        if self.enrichment.provider != ProviderKind::None {
            if self.enrichment.excerpt_chars == 0 {
                return Err("enrichment.excerpt_chars must be greater than 0".to_string());
            }
            if self.enrichment.timeout_secs == 0 {
                return Err("enrichment.timeout_secs must be greater than 0".to_string());
            }
            if self.enrichment.model.trim().is_empty() {
                return Err("enrichment.model must not be empty".to_string());
            }
        }
        if self.enrichment.provider == ProviderKind::Ollama && self.enrichment.endpoint.trim().is_empty() {
            return Err("enrichment.endpoint must not be empty for ollama".to_string());
        }
        Ok(())
    }

    /// Aggressive preset: every extractor, short enrichment calls
    pub fn aggressive() -> Self {
        Self {
            extractor_set: ExtractorSetKind::Extended,
            min_printable_run: 8,
            snippet_chars: 200,
            enrichment: EnrichmentConfig {
                excerpt_chars: 2_000,
                timeout_secs: 20,
                ..EnrichmentConfig::default()
            },
        }
    }

    /// Lenient preset: basic extractors, generous enrichment budget
    pub fn lenient() -> Self {
        Self {
            extractor_set: ExtractorSetKind::Basic,
            min_printable_run: 12,
            snippet_chars: 400,
            enrichment: EnrichmentConfig {
                excerpt_chars: 6_000,
                timeout_secs: 180,
                ..EnrichmentConfig::default()
            },
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extractor_set: ExtractorSetKind::Basic,
            min_printable_run: 10,
            snippet_chars: 200,
            enrichment: EnrichmentConfig::default(),
        }
    }
}
