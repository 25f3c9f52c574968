//! Cross-module tests for the per-document pipeline

use lopdf::dictionary;
use lopdf::{Document as PdfDocument, Object, Stream};

/// Build a one-page PDF whose content stream shows `text`
pub(crate) fn make_test_pdf(text: &str) -> Vec<u8> {
    let mut doc = PdfDocument::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let resources = dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    };

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => resources,
    });

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    });

    if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
        dict.set("Parent", pages_id);
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("serialize test pdf");
    buf
}

#[cfg(test)]
mod tests {
    use super::make_test_pdf;
    use crate::{ExtractorSetKind, PipelineConfig, PipelineContext, PolicyPipeline};
    use covenant_domain::{Category, Document, DocumentSource, EnrichmentSource, FieldSet};
    use covenant_llm::MockProvider;
    use std::sync::Arc;
    use std::time::Duration;

    // Raw bytes go through the printable scan, which splits on punctuation
    const POLICY_TEXT: &str = "HDFC Click 2 Protect\n\
        Sum Assured 50 Lakh\n\
        Annual premium Rs 12000\n\
        Entry age 18 to 65 years\n\
        Accidental Death Benefit rider available\n\
        Free look period of 30 days\n\
        Grace period 15 days\n";

    fn document(name: &str, content: Vec<u8>) -> Document {
        let category = Category::from_key("protection").unwrap();
        let identifier = format!("Protection_Plans/{}", name);
        Document::new(
            DocumentSource::new(format!("/in/{}", identifier), identifier, category),
            content,
        )
    }

    fn extended() -> PipelineConfig {
        PipelineConfig {
            extractor_set: ExtractorSetKind::Extended,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_full_flow_with_model_narrative() {
        let provider = MockProvider::new(
            r#"```json
            {"key_features": ["Pure term cover", "Online purchase"], "benefits": ["Lump sum on death"],
             "sum_assured_options": [1], "claims_process": "Call the helpline"}
            ```"#,
        );
        let context = PipelineContext::with_provider(extended(), Arc::new(provider.clone())).unwrap();
        let pipeline = PolicyPipeline::new(context);

        let draft = pipeline
            .process(&document("HDFC_Click_2_Protect.pdf", POLICY_TEXT.as_bytes().to_vec()))
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(draft.insurer, "HDFC Life");
        assert_eq!(draft.fields.sum_assured_options, vec![5_000_000]);
        assert_eq!(draft.fields.premium_amounts, vec![12_000]);
        assert_eq!(draft.fields.free_look_period_days, 30);
        assert_eq!(draft.fields.grace_period_days, 15);
        assert!(draft.fields.has_accidental_death_benefit);
        assert_eq!(
            draft.ai_enrichment.source,
            EnrichmentSource::Model {
                model: "mock".to_string()
            }
        );
        assert_eq!(draft.ai_enrichment.claims_process, "Call the helpline");
    }

    #[tokio::test]
    async fn test_narrative_failure_leaves_fields_unchanged() {
        let good = MockProvider::new(r#"{"key_features": ["Pure term cover"]}"#);
        let bad = MockProvider::failing();
        let doc = document("Term_Plan.pdf", POLICY_TEXT.as_bytes().to_vec());

        let with_model = PolicyPipeline::new(PipelineContext::with_provider(extended(), Arc::new(good)).unwrap())
            .process(&doc)
            .await
            .unwrap();
        let with_fallback = PolicyPipeline::new(PipelineContext::with_provider(extended(), Arc::new(bad)).unwrap())
            .process(&doc)
            .await
            .unwrap();

        assert_eq!(with_model.fields, with_fallback.fields);
        assert_eq!(with_model.premium_yearly, with_fallback.premium_yearly);
        assert!(!with_model.ai_enrichment.source.is_template());
        assert!(with_fallback.ai_enrichment.source.is_template());
    }

    #[tokio::test]
    async fn test_hung_provider_times_out_to_template() {
        let mut config = extended();
        config.enrichment.timeout_secs = 1;
        let provider = MockProvider::new(r#"{"key_features": ["late"]}"#).with_delay(Duration::from_secs(10));
        let pipeline = PolicyPipeline::new(PipelineContext::with_provider(config, Arc::new(provider)).unwrap());

        let draft = pipeline
            .process(&document("Slow.pdf", POLICY_TEXT.as_bytes().to_vec()))
            .await
            .unwrap();
        assert!(draft.ai_enrichment.source.is_template());
    }

    #[tokio::test]
    async fn test_unreadable_document_never_calls_provider() {
        let provider = MockProvider::new(r#"{"key_features": ["x"]}"#);
        let pipeline = PolicyPipeline::new(PipelineContext::with_provider(extended(), Arc::new(provider.clone())).unwrap());

        let draft = pipeline
            .process(&document("Scanned.pdf", vec![0u8, 1, 2, 3, 255]))
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 0);
        assert!(draft.is_fallback_only());
        assert_eq!(draft.fields, FieldSet::default());
        assert!(draft.ai_enrichment.has_narrative());
    }

    #[tokio::test]
    async fn test_pdf_document_through_pipeline() {
        let pdf = make_test_pdf("Sum Assured 5 Lakh");
        let pipeline = PolicyPipeline::new(PipelineContext::from_config(PipelineConfig::default()).unwrap());

        let draft = pipeline.process(&document("LIC_Tech_Term.pdf", pdf)).await.unwrap();
        assert!(draft.fields.sum_assured_options.contains(&500_000));
        assert_eq!(draft.insurer, "LIC");
        assert!(!draft.provenance.content_snippet.is_empty());
    }

    #[tokio::test]
    async fn test_basic_set_leaves_structural_defaults() {
        let pipeline = PolicyPipeline::new(PipelineContext::from_config(PipelineConfig::default()).unwrap());
        let draft = pipeline
            .process(&document("Term.pdf", POLICY_TEXT.as_bytes().to_vec()))
            .await
            .unwrap();

        assert_eq!(draft.fields.free_look_period_days, FieldSet::default().free_look_period_days);
        assert!(!draft.fields.has_accidental_death_benefit);
        assert!(draft
            .provenance
            .defaulted_fields
            .contains(&"free_look_period_days".to_string()));
    }
}
