//! Per-document pipeline
//!
//! One configurable pipeline replaces the plain, AI and extended variants:
//! the extractor set and the enrichment provider are fixed when the
//! [`PipelineContext`] is built, and everything downstream is shared.

use crate::assembler::{policy_name, RecordAssembler};
use crate::config::PipelineConfig;
use crate::enrich::{Enricher, SharedProvider};
use crate::error::ExtractorError;
use crate::fields::ExtractorSet;
use crate::text::TextExtractor;
use covenant_domain::{Document, ExtractedText, FieldSet, PartialFieldSet, PolicyDraft};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything a worker needs, built once per run
#[derive(Debug)]
pub struct PipelineContext {
    config: PipelineConfig,
    text: TextExtractor,
    extractors: ExtractorSet,
    enricher: Enricher,
    assembler: RecordAssembler,
}

impl PipelineContext {
    /// Build a context from configuration
    pub fn from_config(config: PipelineConfig) -> Result<Arc<Self>, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let enricher = Enricher::from_config(&config.enrichment)?;
        Ok(Arc::new(Self::assemble(config, enricher)))
    }

    /// Build a context around an explicit provider
    pub fn with_provider(config: PipelineConfig, provider: SharedProvider) -> Result<Arc<Self>, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let enricher = Enricher::with_provider(
            provider,
            config.enrichment.excerpt_chars,
            config.enrichment.timeout(),
        );
        Ok(Arc::new(Self::assemble(config, enricher)))
    }

    fn assemble(config: PipelineConfig, enricher: Enricher) -> Self {
        Self {
            text: TextExtractor::new(config.min_printable_run),
            extractors: ExtractorSet::for_kind(config.extractor_set),
            assembler: RecordAssembler::new(config.snippet_chars),
            enricher,
            config,
        }
    }

    /// Configuration the context was built from
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Active field extractors
    pub fn extractors(&self) -> &ExtractorSet {
        &self.extractors
    }

    /// Whether narratives can come from a provider
    pub fn has_provider(&self) -> bool {
        self.enricher.has_provider()
    }
}

/// Turns one document into one validated draft
#[derive(Debug, Clone)]
pub struct PolicyPipeline {
    context: Arc<PipelineContext>,
}

impl PolicyPipeline {
    /// Create a pipeline over a shared context
    pub fn new(context: Arc<PipelineContext>) -> Self {
        Self { context }
    }

    /// Recover text and run the field extractors on a blocking thread
    ///
    /// PDF parsing and pattern matching are CPU-bound and must not hold an
    /// async worker. A panic inside the blocking task is resumed here so the
    /// caller's task boundary sees it.
    pub async fn recover_fields(&self, document: &Document) -> Result<(ExtractedText, PartialFieldSet), ExtractorError> {
        let context = Arc::clone(&self.context);
        let content = document.shared_content();
        let joined = tokio::task::spawn_blocking(move || {
            let text = context.text.extract(&content);
            let partial = context.extractors.run(&text.text);
            (text, partial)
        })
        .await;

        match joined {
            Ok(recovered) => Ok(recovered),
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(ExtractorError::Task(e.to_string())),
        }
    }

    /// Run every stage for one document
    ///
    /// Absent text is not an error: the draft then carries every default and
    /// a template narrative. Only a draft that fails validation is an error.
    pub async fn process(&self, document: &Document) -> Result<PolicyDraft, ExtractorError> {
        let source = document.source();
        let (text, partial) = self.recover_fields(document).await?;
        if text.is_empty() {
            info!(source = %source.identifier, "No text recovered, using defaults");
        } else {
            debug!(
                source = %source.identifier,
                strategy = text.strategy.map(|s| s.as_str()).unwrap_or("none"),
                chars = text.text.len(),
                "Text recovered"
            );
        }

        let name = policy_name(&source.path);
        let basic = FieldSet::from_partial(partial.clone());
        let enrichment = self
            .context
            .enricher
            .enrich(&text, source.category, &name, &basic)
            .await;

        self.context.assembler.assemble(source, &text, partial, enrichment)
    }
}
