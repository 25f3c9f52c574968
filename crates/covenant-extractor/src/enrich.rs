//! Enrichment Adapter
//!
//! Narrative-only augmentation. With a provider configured, the extracted
//! text is sent out once; any failure (call error, timeout, unusable
//! response) falls back to a deterministic template for the category. The
//! adapter never fails and never touches factual fields.

use crate::config::{EnrichmentConfig, ProviderKind};
use crate::error::ExtractorError;
use crate::parser::parse_enrichment;
use crate::prompt::PromptBuilder;
use covenant_domain::traits::LlmProvider;
use covenant_domain::{Category, EnrichmentResult, EnrichmentSource, ExtractedText, FieldSet};
use covenant_llm::{GeminiProvider, LlmError, OllamaProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shared handle to a narrative provider
pub type SharedProvider = Arc<dyn LlmProvider<Error = LlmError>>;

/// Produces the narrative fields of a record
#[derive(Clone)]
pub struct Enricher {
    provider: Option<SharedProvider>,
    excerpt_chars: usize,
    timeout: Duration,
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("provider", &self.provider.as_ref().map(|p| p.model_name().to_string()))
            .field("excerpt_chars", &self.excerpt_chars)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Enricher {
    /// Enricher that always uses the template
    pub fn template_only() -> Self {
        Self {
            provider: None,
            excerpt_chars: 0,
            timeout: Duration::ZERO,
        }
    }

    /// Enricher backed by a provider
    pub fn with_provider(provider: SharedProvider, excerpt_chars: usize, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            excerpt_chars,
            timeout,
        }
    }

    /// Build the enricher named by the configuration
    ///
    /// A missing Gemini API key downgrades to the template with a warning;
    /// a provider that cannot be constructed for any other reason is a
    /// configuration error.
    pub fn from_config(config: &EnrichmentConfig) -> Result<Self, ExtractorError> {
        let timeout = config.timeout();
        let provider: SharedProvider = match config.provider {
            ProviderKind::None => return Ok(Self::template_only()),
            ProviderKind::Ollama => Arc::new(
                OllamaProvider::with_timeout(&config.endpoint, &config.model, timeout)
                    .map_err(|e| ExtractorError::Config(e.to_string()))?,
            ),
            ProviderKind::Gemini => match GeminiProvider::from_env(&config.model, timeout) {
                Ok(provider) => Arc::new(provider),
                Err(LlmError::NotConfigured(reason)) => {
                    warn!(reason = %reason, "Gemini not configured, narratives will use templates");
                    return Ok(Self::template_only());
                }
                Err(e) => return Err(ExtractorError::Config(e.to_string())),
            },
        };

        info!(model = provider.model_name(), "Enrichment provider ready");
        Ok(Self::with_provider(provider, config.excerpt_chars, timeout))
    }

    /// Whether a provider is configured
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Narrative for one document; always succeeds
    pub async fn enrich(
        &self,
        text: &ExtractedText,
        category: Category,
        policy_name: &str,
        fields: &FieldSet,
    ) -> EnrichmentResult {
        let Some(provider) = &self.provider else {
            return template(category);
        };
        if text.is_empty() {
            debug!(category = category.label, "No text to enrich, using template");
            return template(category);
        }

        match self.call(provider, text, category, policy_name, fields).await {
            Ok(result) => result,
            Err(e) => {
                warn!(category = category.label, policy = policy_name, error = %e, "Enrichment failed, using template");
                template(category)
            }
        }
    }

    async fn call(
        &self,
        provider: &SharedProvider,
        text: &ExtractedText,
        category: Category,
        policy_name: &str,
        fields: &FieldSet,
    ) -> Result<EnrichmentResult, ExtractorError> {
        let prompt = PromptBuilder::new(category, policy_name, &text.text, self.excerpt_chars)
            .with_fields(fields)
            .build();

        let response = tokio::time::timeout(self.timeout, provider.generate(&prompt))
            .await
            .map_err(|_| ExtractorError::Timeout(self.timeout.as_secs()))??;

        parse_enrichment(&response, provider.model_name())
    }
}

/// Deterministic narrative for a category
pub fn template(category: Category) -> EnrichmentResult {
    let (key_features, unique_features): (&[&str], &[&str]) = match category.key {
        "annuity" => (
            &["Guaranteed lifelong income", "Multiple annuity options", "Joint life cover available"],
            &["Income starts immediately or after deferment", "Option to return purchase price"],
        ),
        "health" => (
            &["Cashless hospitalisation at network hospitals", "Pre and post hospitalisation cover", "Family floater option"],
            &["Lifelong renewability", "No-claim bonus on renewal"],
        ),
        "pension" => (
            &["Builds a retirement corpus", "Regular income after vesting", "Tax benefits on contributions"],
            &["Flexible vesting age", "Commutation option at vesting"],
        ),
        "protection" => (
            &["High life cover at affordable premiums", "Financial protection for the family", "Optional riders for added cover"],
            &["Level or decreasing cover options", "Payout as lump sum or income"],
        ),
        "savings" => (
            &["Guaranteed maturity benefit", "Life cover throughout the term", "Disciplined long-term savings"],
            &["Loan facility against the policy", "Flexible premium payment terms"],
        ),
        "ulip" => (
            &["Market-linked returns", "Choice of investment funds", "Life cover with wealth creation"],
            &["Free fund switches", "Partial withdrawals after lock-in"],
        ),
        _ => (
            &["Comprehensive coverage", "Flexible premium options", "Family protection"],
            &["Tax benefits", "Flexible payment options"],
        ),
    };

    EnrichmentResult {
        key_features: key_features.iter().map(|s| s.to_string()).collect(),
        benefits: vec![
            format!("Benefits as per the terms of this {}", category.label),
            "Tax benefits as per prevailing laws".to_string(),
        ],
        unique_features: unique_features.iter().map(|s| s.to_string()).collect(),
        claims_process: "Simplified claims process with minimal documentation".to_string(),
        source: EnrichmentSource::Template,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_domain::TextStrategyKind;
    use covenant_llm::MockProvider;

    fn text() -> ExtractedText {
        ExtractedText::new("Health plan with cashless claims".to_string(), TextStrategyKind::Layout)
    }

    fn health() -> Category {
        Category::from_key("health").unwrap()
    }

    #[test]
    fn test_from_config_without_provider() {
        let enricher = Enricher::from_config(&EnrichmentConfig::default()).unwrap();
        assert!(!enricher.has_provider());
    }

    #[test]
    fn test_from_config_ollama() {
        let config = EnrichmentConfig {
            provider: ProviderKind::Ollama,
            model: "llama3".to_string(),
            ..Default::default()
        };
        let enricher = Enricher::from_config(&config).unwrap();
        assert!(enricher.has_provider());
    }

    #[test]
    fn test_templates_are_deterministic_and_non_empty() {
        for category in Category::all() {
            let a = template(*category);
            assert!(a.has_narrative());
            assert!(a.source.is_template());
            assert_eq!(a, template(*category));
        }
    }

    #[tokio::test]
    async fn test_no_provider_uses_template() {
        let result = Enricher::template_only()
            .enrich(&text(), health(), "Optima", &FieldSet::default())
            .await;
        assert_eq!(result, template(health()));
    }

    #[tokio::test]
    async fn test_provider_response_used() {
        let provider = MockProvider::new(r#"Here you go {"key_features": ["Restore benefit"]}"#);
        let enricher = Enricher::with_provider(Arc::new(provider.clone()), 3000, Duration::from_secs(5));

        let result = enricher.enrich(&text(), health(), "Optima", &FieldSet::default()).await;
        assert_eq!(result.key_features, vec!["Restore benefit"]);
        assert_eq!(result.source, EnrichmentSource::Model { model: "mock".to_string() });
        assert_eq!(provider.call_count(), 1);

        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("Category: Health Plan"));
        assert!(prompt.contains("Policy name: Optima"));
        assert!(prompt.contains("cashless claims"));
    }

    #[tokio::test]
    async fn test_empty_text_skips_provider() {
        let provider = MockProvider::new(r#"{"key_features": ["x"]}"#);
        let enricher = Enricher::with_provider(Arc::new(provider.clone()), 3000, Duration::from_secs(5));

        let result = enricher
            .enrich(&ExtractedText::empty(), health(), "Optima", &FieldSet::default())
            .await;
        assert!(result.source.is_template());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_falls_back_once() {
        let provider = MockProvider::failing();
        let enricher = Enricher::with_provider(Arc::new(provider.clone()), 3000, Duration::from_secs(5));

        let result = enricher.enrich(&text(), health(), "Optima", &FieldSet::default()).await;
        assert_eq!(result, template(health()));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back() {
        let provider = MockProvider::new("I cannot help with that.");
        let enricher = Enricher::with_provider(Arc::new(provider), 3000, Duration::from_secs(5));

        let result = enricher.enrich(&text(), health(), "Optima", &FieldSet::default()).await;
        assert!(result.source.is_template());
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let provider = MockProvider::new(r#"{"key_features": ["late"]}"#).with_delay(Duration::from_secs(5));
        let enricher = Enricher::with_provider(Arc::new(provider), 3000, Duration::from_millis(50));

        let result = enricher.enrich(&text(), health(), "Optima", &FieldSet::default()).await;
        assert!(result.source.is_template());
    }
}
