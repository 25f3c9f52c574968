//! Record Assembler
//!
//! Merges extractor output and enrichment into one validated draft.

use crate::error::ExtractorError;
use covenant_domain::{
    DocumentSource, EnrichmentResult, ExtractedText, FieldSet, PartialFieldSet, PolicyDraft,
    Provenance, RecordValidator,
};
use std::path::Path;
use tracing::debug;

/// Insurer used when the file name matches no known insurer
pub const UNKNOWN_INSURER: &str = "Unknown";

/// File-name needle to insurer, tried in order
const INSURERS: &[(&str, &str)] = &[
    ("POLICYBAZAAR", "PolicyBazaar"),
    ("HDFC", "HDFC Life"),
    ("ICICI", "ICICI Lombard"),
    ("SBI", "SBI Life"),
    ("LIC", "LIC"),
    ("BAJAJ", "Bajaj Allianz"),
    ("TATA", "TATA AIG"),
    ("RELIANCE", "Reliance Life"),
];

/// Needles this short must match a whole token
const SHORT_NEEDLE: usize = 3;

/// Human-readable policy name from the file stem
pub fn policy_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Insurer inferred from the file name
pub fn infer_insurer(file_name: &str) -> &'static str {
    let upper = file_name.to_ascii_uppercase();
    let tokens: Vec<&str> = upper
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    INSURERS
        .iter()
        .find(|(needle, _)| {
            if needle.len() <= SHORT_NEEDLE {
                tokens.contains(needle)
            } else {
                upper.contains(needle)
            }
        })
        .map(|(_, insurer)| *insurer)
        .unwrap_or(UNKNOWN_INSURER)
}

/// Builds validated drafts
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    snippet_chars: usize,
    validator: RecordValidator,
}

impl RecordAssembler {
    /// Create an assembler keeping `snippet_chars` characters of text
    pub fn new(snippet_chars: usize) -> Self {
        Self {
            snippet_chars,
            validator: RecordValidator::new(),
        }
    }

    /// Assemble and validate one draft
    ///
    /// Slots the extractors left empty keep their defaults and are listed in
    /// the provenance. A draft that fails the schema check is an error.
    pub fn assemble(
        &self,
        source: &DocumentSource,
        text: &ExtractedText,
        partial: PartialFieldSet,
        enrichment: EnrichmentResult,
    ) -> Result<PolicyDraft, ExtractorError> {
        let defaulted_fields: Vec<String> = partial.missing_fields().into_iter().map(String::from).collect();
        let fields = FieldSet::from_partial(partial);
        let file_name = source.file_name();

        debug!(
            source = %source.identifier,
            defaulted = defaulted_fields.len(),
            "Assembling record"
        );

        let draft = PolicyDraft {
            category: source.category,
            category_key: source.category.key.to_string(),
            insurer: infer_insurer(&file_name).to_string(),
            policy_name: policy_name(&source.path),
            premium_yearly: fields.premium_table(),
            fields,
            ai_enrichment: enrichment,
            provenance: Provenance {
                source_file: file_name,
                source_path: source.identifier.clone(),
                content_snippet: text.snippet(self.snippet_chars),
                defaulted_fields,
            },
        };

        let validation = self.validator.validate(&draft);
        if !validation.is_accepted() {
            return Err(ExtractorError::Validation(validation.describe()));
        }
        Ok(draft)
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::template;
    use covenant_domain::{Category, TextStrategyKind};

    fn source(name: &str) -> DocumentSource {
        let category = Category::from_key("protection").unwrap();
        DocumentSource::new(
            format!("/data/Protection_Plans/{}", name),
            format!("Protection_Plans/{}", name),
            category,
        )
    }

    #[test]
    fn test_policy_name_from_stem() {
        assert_eq!(policy_name(Path::new("a/HDFC_Click-2-Protect.pdf")), "HDFC Click 2 Protect");
        assert_eq!(policy_name(Path::new("plain.pdf")), "plain");
    }

    #[test]
    fn test_insurer_table() {
        assert_eq!(infer_insurer("HDFC_Life_Sanchay.pdf"), "HDFC Life");
        assert_eq!(infer_insurer("icici-pru-iprotect.pdf"), "ICICI Lombard");
        assert_eq!(infer_insurer("LIC_Jeevan_Anand.pdf"), "LIC");
        assert_eq!(infer_insurer("sbi life eshield.pdf"), "SBI Life");
        assert_eq!(infer_insurer("Tata_AIA_Sampoorna.pdf"), "TATA AIG");
        assert_eq!(infer_insurer("Generic_Plan.pdf"), UNKNOWN_INSURER);
    }

    #[test]
    fn test_short_needles_need_whole_token() {
        assert_eq!(infer_insurer("Policybazaar_Term.pdf"), "PolicyBazaar");
        assert_eq!(infer_insurer("Public_Policy_Plan.pdf"), UNKNOWN_INSURER);
        assert_eq!(infer_insurer("Sbicap_Plan.pdf"), UNKNOWN_INSURER);
    }

    #[test]
    fn test_assemble_records_defaults() {
        let assembler = RecordAssembler::default();
        let src = source("Generic_Plan.pdf");
        let draft = assembler
            .assemble(
                &src,
                &ExtractedText::empty(),
                PartialFieldSet::default(),
                template(src.category),
            )
            .unwrap();

        assert!(draft.is_fallback_only());
        assert_eq!(draft.fields, FieldSet::default());
        assert_eq!(draft.provenance.content_snippet, "");
        assert_eq!(draft.provenance.source_path, "Protection_Plans/Generic_Plan.pdf");
        assert_eq!(draft.premium_yearly.len(), 2);
    }

    #[test]
    fn test_assemble_tracks_filled_fields() {
        let assembler = RecordAssembler::new(10);
        let src = source("HDFC_Term.pdf");
        let partial = PartialFieldSet {
            sum_assured_options: Some(vec![500_000]),
            ..Default::default()
        };
        let text = ExtractedText::new("Sum Assured 5 Lakh and more".to_string(), TextStrategyKind::Layout);
        let draft = assembler.assemble(&src, &text, partial, template(src.category)).unwrap();

        assert!(!draft.is_fallback_only());
        assert!(!draft.provenance.defaulted_fields.contains(&"sum_assured_options".to_string()));
        assert!(draft.provenance.defaulted_fields.contains(&"premium_amounts".to_string()));
        assert_eq!(draft.provenance.content_snippet, "Sum Assure...");
        assert_eq!(draft.insurer, "HDFC Life");
        assert_eq!(draft.premium_yearly.get(&500_000), Some(&5000));
    }

    #[test]
    fn test_invalid_draft_rejected() {
        let assembler = RecordAssembler::default();
        let src = source("Plan.pdf");
        let mut narrative = template(src.category);
        narrative.key_features.clear();

        let result = assembler.assemble(&src, &ExtractedText::empty(), PartialFieldSet::default(), narrative);
        assert!(matches!(result, Err(ExtractorError::Validation(_))));
    }
}
