//! Policy records
//!
//! The Record Assembler produces a [`PolicyDraft`] per document. Drafts are
//! numbered only once every worker has finished, when the catalog turns them
//! into [`PolicyRecord`]s. Failed documents never reach this stage and so
//! never consume an identifier.

use crate::category::Category;
use crate::enrichment::EnrichmentResult;
use crate::fields::FieldSet;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Where a record came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    /// File name of the source document
    pub source_file: String,

    /// Identifier of the source document relative to the input root
    pub source_path: String,

    /// Leading excerpt of the recovered text (empty when none was recovered)
    pub content_snippet: String,

    /// Fields that carry their documented default
    pub defaulted_fields: Vec<String>,
}

fn serialize_label<S: Serializer>(category: &Category, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(category.label)
}

/// A finalized record that has not been assigned its identifier yet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyDraft {
    /// Category the document was discovered under (serialized as its label)
    #[serde(serialize_with = "serialize_label")]
    pub category: Category,

    /// Category key, as used in identifiers
    pub category_key: String,

    /// Insurer inferred from the file name
    pub insurer: String,

    /// Human-readable policy name
    pub policy_name: String,

    /// Factual fields
    #[serde(flatten)]
    pub fields: FieldSet,

    /// Premium table keyed by coverage level
    pub premium_yearly: BTreeMap<u64, u64>,

    /// Narrative fields
    pub ai_enrichment: EnrichmentResult,

    /// Source information
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl PolicyDraft {
    /// Whether every factual field carries its default
    pub fn is_fallback_only(&self) -> bool {
        self.provenance.defaulted_fields.len() >= FieldSet::FIELD_NAMES.len()
    }

    /// Key that orders drafts within a category
    pub fn emission_key(&self) -> &str {
        &self.provenance.source_path
    }
}

/// A draft with its stable `policy_id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyRecord {
    /// `{category_key}_{position}`, unique across the master manifest
    pub policy_id: String,

    /// The record body
    #[serde(flatten)]
    pub draft: PolicyDraft,
}

impl PolicyRecord {
    /// Number a draft at its 1-based position within its category
    pub fn number(draft: PolicyDraft, position: usize) -> Self {
        Self {
            policy_id: draft.category.policy_id(position),
            draft,
        }
    }

    /// Category of the record
    pub fn category(&self) -> Category {
        self.draft.category
    }
}
