//! Covenant Extractor
//!
//! Turns one policy document into one validated [`PolicyDraft`].
//!
//! # Overview
//!
//! Every document runs through the same chain of stages. Text recovery and
//! field extraction are deterministic; enrichment is the only stage that may
//! call out, and it can never change a factual value.
//!
//! # Architecture
//!
//! ```text
//! bytes → TextExtractor → ExtractorSet → Enricher → RecordAssembler → PolicyDraft
//! ```
//!
//! # Key Features
//!
//! - **Text ladder**: layout-aware, sequential, then a printable-run scan
//! - **Pure field extractors**: disjoint slots, plausibility filtered
//! - **Narrative enrichment**: optional provider with template fallback
//! - **Provenance**: source identifiers, snippet and defaulted fields
//!
//! # Example Usage
//!
//! ```
//! use covenant_domain::{Category, Document, DocumentSource};
//! use covenant_extractor::{PipelineConfig, PipelineContext, PolicyPipeline};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let category = Category::from_key("protection").ok_or("unknown category")?;
//! let source = DocumentSource::new("Protection_Plans/Term_Shield.pdf", "Protection_Plans/Term_Shield.pdf", category);
//! let document = Document::new(source, b"Sum Assured 5 Lakh".to_vec());
//!
//! let pipeline = PolicyPipeline::new(PipelineContext::from_config(PipelineConfig::default())?);
//! let draft = pipeline.process(&document).await?;
//!
//! assert!(draft.fields.sum_assured_options.contains(&500_000));
//! assert!(draft.ai_enrichment.source.is_template());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
pub mod assembler;
pub mod config;
pub mod enrich;
pub mod fields;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod text;

#[cfg(test)]
mod tests;

pub use assembler::{infer_insurer, policy_name, RecordAssembler};
pub use config::{EnrichmentConfig, ExtractorSetKind, PipelineConfig, ProviderKind};
pub use enrich::{Enricher, SharedProvider};
pub use error::ExtractorError;
pub use fields::ExtractorSet;
pub use pipeline::{PipelineContext, PolicyPipeline};
pub use text::TextExtractor;
