//! Prompt construction for narrative enrichment

use covenant_domain::{Category, FieldSet};

/// Builds the enrichment prompt for one document
pub struct PromptBuilder<'a> {
    category: Category,
    policy_name: &'a str,
    text: &'a str,
    excerpt_chars: usize,
    fields: Option<&'a FieldSet>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(category: Category, policy_name: &'a str, text: &'a str, excerpt_chars: usize) -> Self {
        Self {
            category,
            policy_name,
            text,
            excerpt_chars,
            fields: None,
        }
    }

    /// Add the already-extracted fields as context
    pub fn with_fields(mut self, fields: &'a FieldSet) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ENRICHMENT_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(&format!("Category: {}\n", self.category.label));
        prompt.push_str(&format!("Policy name: {}\n", self.policy_name));

        if let Some(fields) = self.fields {
            prompt.push_str("Already extracted (do not repeat or change):\n");
            prompt.push_str(&format!("- Premiums: {:?}\n", fields.premium_amounts));
            prompt.push_str(&format!("- Sum assured options: {:?}\n", fields.sum_assured_options));
            prompt.push_str(&format!(
                "- Entry age: {} to {}\n",
                fields.eligibility.min_age, fields.eligibility.max_age
            ));
        }
        prompt.push('\n');

        prompt.push_str(&format!(
            "Document text (first {} characters):\n---\n",
            self.excerpt_chars
        ));
        prompt.extend(self.text.chars().take(self.excerpt_chars));
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt
    }
}

const ENRICHMENT_INSTRUCTIONS: &str = "\
You are summarising an insurance policy document for a comparison catalog.
Describe the policy in plain language. Do not state any amounts, ages, periods
or counts; those are extracted separately.";

const OUTPUT_FORMAT_REMINDER: &str = r#"Respond with a single JSON object and nothing else, in this shape:
{
  "key_features": ["3 to 5 short feature statements"],
  "benefits": ["benefit descriptions"],
  "unique_features": ["what sets this policy apart"],
  "claims_process": "one or two sentences on how claims are made"
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_context() {
        let category = Category::from_key("annuity").unwrap();
        let fields = FieldSet::default();
        let prompt = PromptBuilder::new(category, "Smart Pension", "Immediate annuity text", 3000)
            .with_fields(&fields)
            .build();

        assert!(prompt.contains("Category: Annuity Plan"));
        assert!(prompt.contains("Policy name: Smart Pension"));
        assert!(prompt.contains("Immediate annuity text"));
        assert!(prompt.contains("\"key_features\""));
        assert!(prompt.contains("Entry age: 18 to 65"));
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let category = Category::from_key("ulip").unwrap();
        let text = "x".repeat(10_000);
        let prompt = PromptBuilder::new(category, "Wealth Plus", &text, 100).build();
        assert!(prompt.contains(&"x".repeat(100)));
        assert!(!prompt.contains(&"x".repeat(101)));
    }
}
