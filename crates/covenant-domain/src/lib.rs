//! Covenant Domain Layer
//!
//! This crate contains the data model shared by every stage of the policy
//! catalog pipeline. It defines the records that flow from documents to the
//! final manifests, the fixed category table, the plausibility ranges and
//! defaults of every extracted field, and the trait seam for narrative
//! generation.
//!
//! ## Key Concepts
//!
//! - **Document**: A discovered policy file plus its category hint
//! - **FieldSet**: Every factual field of a policy, always populated
//! - **EnrichmentResult**: Narrative-only augmentation, never factual
//! - **PolicyDraft**: One assembled record per document, before numbering
//! - **PolicyRecord**: A draft with its stable `policy_id`
//!
//! ## Architecture
//!
//! - Pure data and validation only, no I/O
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod document;
pub mod enrichment;
pub mod fields;
pub mod record;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use category::{Category, CATEGORIES};
pub use document::{Document, DocumentSource, ExtractedText, TextStrategyKind};
pub use enrichment::{EnrichmentResult, EnrichmentSource};
pub use fields::{AgeRange, FieldSet, PartialFieldSet, Plausibility, Rider, WaitingPeriod};
pub use record::{PolicyDraft, PolicyRecord, Provenance};
pub use traits::LlmProvider;
pub use validation::{RecordValidator, RejectionReason, ValidationResult, ValidationStatus};
