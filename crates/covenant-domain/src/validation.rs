//! Record validation
//!
//! Every assembled draft is checked against the field schema before it is
//! accepted into a batch. A rejected draft is a document-level failure.

use crate::fields::{
    FieldSet, Plausibility, ADULT_AGE_CEILING, ADULT_AGE_FLOOR, CHILD_AGE_CEILING,
    CHILD_AGE_FLOOR, COVERAGE_RANGE, FREE_LOOK_RANGE, GRACE_PERIOD_RANGE, MAX_EXCLUSIONS,
    MAX_PAYMENT_MODES, MAX_PAYOUT_FREQUENCIES, MAX_PREMIUMS, MAX_RIDERS, MAX_SUM_ASSURED,
    PRE_EXISTING_MONTHS_RANGE, PREMIUM_RANGE, RIDER_PREMIUM_RANGE, WAITING_DAYS_RANGE,
};
use crate::record::PolicyDraft;

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Draft accepted
    Accepted,

    /// Draft rejected
    Rejected,
}

/// Reasons for rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// A required list or table is empty
    EmptyField(&'static str),

    /// A value lies outside its plausibility range
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Offending value
        value: u64,
    },

    /// A list exceeds its cap
    TooMany {
        /// Field name
        field: &'static str,
        /// Actual length
        len: usize,
        /// Allowed length
        cap: usize,
    },

    /// An age range is unordered or outside its clamp interval
    InvalidAgeRange(&'static str),

    /// The category key does not match the category
    CategoryMismatch(String),

    /// The narrative has no key features
    MissingNarrative,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::EmptyField(field) => write!(f, "{} is empty", field),
            RejectionReason::OutOfRange { field, value } => {
                write!(f, "{} value {} is out of range", field, value)
            }
            RejectionReason::TooMany { field, len, cap } => {
                write!(f, "{} has {} entries (cap {})", field, len, cap)
            }
            RejectionReason::InvalidAgeRange(field) => write!(f, "{} is not a sane age range", field),
            RejectionReason::CategoryMismatch(key) => write!(f, "category key {} does not match label", key),
            RejectionReason::MissingNarrative => write!(f, "narrative has no key features"),
        }
    }
}

/// Result of draft validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the draft passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,
}

impl ValidationResult {
    /// Whether the draft was accepted
    pub fn is_accepted(&self) -> bool {
        self.status == ValidationStatus::Accepted
    }

    /// All reasons joined into one line
    pub fn describe(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Schema check for assembled drafts
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator;

impl RecordValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a draft against the field schema
    pub fn validate(&self, draft: &PolicyDraft) -> ValidationResult {
        let mut reasons = Vec::new();

        check_fields(&draft.fields, &mut reasons);

        if draft.premium_yearly.is_empty() {
            reasons.push(RejectionReason::EmptyField("premium_yearly"));
        }
        if draft.category.key != draft.category_key {
            reasons.push(RejectionReason::CategoryMismatch(draft.category_key.clone()));
        }
        if !draft.ai_enrichment.has_narrative() {
            reasons.push(RejectionReason::MissingNarrative);
        }

        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };
        ValidationResult { status, reasons }
    }
}

fn check_fields(fields: &FieldSet, reasons: &mut Vec<RejectionReason>) {
    check_amounts("premium_amounts", &fields.premium_amounts, PREMIUM_RANGE, MAX_PREMIUMS, reasons);
    check_amounts(
        "sum_assured_options",
        &fields.sum_assured_options,
        COVERAGE_RANGE,
        MAX_SUM_ASSURED,
        reasons,
    );

    if !fields.eligibility.is_within(ADULT_AGE_FLOOR, ADULT_AGE_CEILING) {
        reasons.push(RejectionReason::InvalidAgeRange("eligibility"));
    }
    if !fields.child_eligibility.is_within(CHILD_AGE_FLOOR, CHILD_AGE_CEILING) {
        reasons.push(RejectionReason::InvalidAgeRange("child_eligibility"));
    }

    check_len("riders", fields.riders.len(), MAX_RIDERS, reasons);
    for rider in &fields.riders {
        check_value("riders", rider.premium, RIDER_PREMIUM_RANGE, reasons);
    }
    check_len("exclusions", fields.exclusions.len(), MAX_EXCLUSIONS, reasons);

    check_value(
        "waiting_period",
        fields.waiting_period.initial_days as u64,
        WAITING_DAYS_RANGE,
        reasons,
    );
    check_value(
        "waiting_period",
        fields.waiting_period.pre_existing_months as u64,
        PRE_EXISTING_MONTHS_RANGE,
        reasons,
    );
    check_value("free_look_period_days", fields.free_look_period_days as u64, FREE_LOOK_RANGE, reasons);
    check_value("grace_period_days", fields.grace_period_days as u64, GRACE_PERIOD_RANGE, reasons);

    if fields.uin.trim().is_empty() {
        reasons.push(RejectionReason::EmptyField("uin"));
    }
    if fields.premium_payment_modes.len() > MAX_PAYMENT_MODES {
        reasons.push(RejectionReason::TooMany {
            field: "premium_payment_modes",
            len: fields.premium_payment_modes.len(),
            cap: MAX_PAYMENT_MODES,
        });
    }
    if fields.annuity_payout_frequency.len() > MAX_PAYOUT_FREQUENCIES {
        reasons.push(RejectionReason::TooMany {
            field: "annuity_payout_frequency",
            len: fields.annuity_payout_frequency.len(),
            cap: MAX_PAYOUT_FREQUENCIES,
        });
    }
}

fn check_amounts(
    field: &'static str,
    values: &[u64],
    range: Plausibility,
    cap: usize,
    reasons: &mut Vec<RejectionReason>,
) {
    check_len(field, values.len(), cap, reasons);
    for value in values {
        check_value(field, *value, range, reasons);
    }
}

fn check_len(field: &'static str, len: usize, cap: usize, reasons: &mut Vec<RejectionReason>) {
    if len == 0 {
        reasons.push(RejectionReason::EmptyField(field));
    } else if len > cap {
        reasons.push(RejectionReason::TooMany { field, len, cap });
    }
}

fn check_value(field: &'static str, value: u64, range: Plausibility, reasons: &mut Vec<RejectionReason>) {
    if !range.contains(value) {
        reasons.push(RejectionReason::OutOfRange { field, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::enrichment::{EnrichmentResult, EnrichmentSource};
    use crate::fields::{AgeRange, Rider};
    use crate::record::Provenance;

    fn draft_with(fields: FieldSet) -> PolicyDraft {
        let category = Category::from_key("protection").unwrap();
        PolicyDraft {
            category,
            category_key: category.key.to_string(),
            insurer: "Unknown".to_string(),
            policy_name: "Term Shield".to_string(),
            premium_yearly: fields.premium_table(),
            fields,
            ai_enrichment: EnrichmentResult {
                key_features: vec!["Pure risk cover".to_string()],
                benefits: vec![],
                unique_features: vec![],
                claims_process: String::new(),
                source: EnrichmentSource::Template,
            },
            provenance: Provenance {
                source_file: "Term_Shield.pdf".to_string(),
                source_path: "Protection_Plans/Term_Shield.pdf".to_string(),
                content_snippet: String::new(),
                defaulted_fields: vec![],
            },
        }
    }

    #[test]
    fn test_default_draft_is_accepted() {
        let result = RecordValidator::new().validate(&draft_with(FieldSet::default()));
        assert!(result.is_accepted(), "{}", result.describe());
    }

    #[test]
    fn test_out_of_range_coverage_rejected() {
        let fields = FieldSet {
            sum_assured_options: vec![50],
            ..Default::default()
        };
        let result = RecordValidator::new().validate(&draft_with(fields));
        assert_eq!(result.status, ValidationStatus::Rejected);
        assert!(result.reasons.contains(&RejectionReason::OutOfRange {
            field: "sum_assured_options",
            value: 50,
        }));
    }

    #[test]
    fn test_empty_riders_rejected() {
        let fields = FieldSet {
            riders: vec![],
            ..Default::default()
        };
        let result = RecordValidator::new().validate(&draft_with(fields));
        assert!(result.reasons.contains(&RejectionReason::EmptyField("riders")));
    }

    #[test]
    fn test_unordered_age_range_rejected() {
        let fields = FieldSet {
            eligibility: AgeRange::new(60, 20),
            ..Default::default()
        };
        let result = RecordValidator::new().validate(&draft_with(fields));
        assert!(result.reasons.contains(&RejectionReason::InvalidAgeRange("eligibility")));
    }

    #[test]
    fn test_rider_premium_checked() {
        let fields = FieldSet {
            riders: vec![Rider::new("Waiver of Premium", 10)],
            ..Default::default()
        };
        let result = RecordValidator::new().validate(&draft_with(fields));
        assert!(!result.is_accepted());
    }

    #[test]
    fn test_missing_narrative_rejected() {
        let mut draft = draft_with(FieldSet::default());
        draft.ai_enrichment.key_features.clear();
        let result = RecordValidator::new().validate(&draft);
        assert!(result.reasons.contains(&RejectionReason::MissingNarrative));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn in_range_amounts_always_accepted(
                premiums in proptest::collection::vec(PREMIUM_RANGE.min..=PREMIUM_RANGE.max, 1..=MAX_PREMIUMS),
                coverage in proptest::collection::vec(COVERAGE_RANGE.min..=COVERAGE_RANGE.max, 1..=MAX_SUM_ASSURED),
            ) {
                let fields = FieldSet {
                    premium_amounts: premiums,
                    sum_assured_options: coverage,
                    ..Default::default()
                };
                let result = RecordValidator::new().validate(&draft_with(fields));
                prop_assert!(result.is_accepted());
            }

            #[test]
            fn below_floor_premium_always_rejected(premium in 0u64..PREMIUM_RANGE.min) {
                let fields = FieldSet {
                    premium_amounts: vec![premium],
                    ..Default::default()
                };
                let result = RecordValidator::new().validate(&draft_with(fields));
                prop_assert!(!result.is_accepted());
            }
        }
    }
}
