//! Narrative-only enrichment of a policy record
//!
//! An `EnrichmentResult` carries prose only. Its keys are disjoint from the
//! [`FieldSet`](crate::FieldSet) schema, so it can never set or overwrite a
//! factual value.

use serde::{Deserialize, Serialize};

/// Where a narrative came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnrichmentSource {
    /// Deterministic category-scoped template
    Template,

    /// External narrative generator
    Model {
        /// Model name reported by the provider configuration
        model: String,
    },
}

impl EnrichmentSource {
    /// Whether this narrative came from the fallback template
    pub fn is_template(&self) -> bool {
        matches!(self, EnrichmentSource::Template)
    }
}

/// Narrative fields attached to a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    /// Headline features of the policy
    pub key_features: Vec<String>,

    /// Benefit descriptions
    #[serde(default)]
    pub benefits: Vec<String>,

    /// Features that set the policy apart
    #[serde(default)]
    pub unique_features: Vec<String>,

    /// Short description of the claims process
    #[serde(default)]
    pub claims_process: String,

    /// Provenance of the narrative
    pub source: EnrichmentSource,
}

impl EnrichmentResult {
    /// Keys a narrative generator is allowed to return
    pub const NARRATIVE_KEYS: &'static [&'static str] =
        &["key_features", "benefits", "unique_features", "claims_process"];

    /// Whether the narrative has at least one non-blank key feature
    pub fn has_narrative(&self) -> bool {
        self.key_features.iter().any(|f| !f.trim().is_empty())
    }

    /// Whether `key` is a narrative key
    pub fn is_narrative_key(key: &str) -> bool {
        Self::NARRATIVE_KEYS.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldSet;

    #[test]
    fn test_narrative_keys_disjoint_from_fields() {
        for key in EnrichmentResult::NARRATIVE_KEYS {
            assert!(!FieldSet::owns(key), "{} overlaps the field schema", key);
        }
    }

    #[test]
    fn test_source_serialization() {
        let template = serde_json::to_value(EnrichmentSource::Template).unwrap();
        assert_eq!(template["kind"], "template");

        let model = serde_json::to_value(EnrichmentSource::Model {
            model: "gemini-2.0-flash".to_string(),
        })
        .unwrap();
        assert_eq!(model["kind"], "model");
        assert_eq!(model["model"], "gemini-2.0-flash");
    }

    #[test]
    fn test_blank_features_are_not_narrative() {
        let result = EnrichmentResult {
            key_features: vec!["  ".to_string()],
            benefits: vec![],
            unique_features: vec![],
            claims_process: String::new(),
            source: EnrichmentSource::Template,
        };
        assert!(!result.has_narrative());
    }
}
