//! Field Extractors
//!
//! Every extractor is a pure `fn(&str) -> PartialFieldSet` that fills only
//! the slots it owns, and only with range-valid values. No two extractors
//! own the same slot, so their outputs merge without conflicts and the order
//! they run in does not matter.

mod amounts;
mod eligibility;
mod modes;
mod structure;
mod terms;
mod vocabulary;

pub use amounts::{coverage, parse_amount, premium};
pub use eligibility::{adult_eligibility, child_eligibility, waiting_period};
pub use modes::{payment_cadence, payout_frequency};
pub use structure::structure;
pub use terms::{identity, operational_terms};
pub use vocabulary::{exclusions, riders};

use crate::config::ExtractorSetKind;
use covenant_domain::PartialFieldSet;
use tracing::debug;

/// A pure field extractor
pub type FieldExtractor = fn(&str) -> PartialFieldSet;

/// Named extractors selected at construction time
#[derive(Debug, Clone)]
pub struct ExtractorSet {
    extractors: Vec<(&'static str, FieldExtractor)>,
}

impl ExtractorSet {
    /// Premium, coverage, eligibility, riders and exclusions
    pub fn basic() -> Self {
        Self {
            extractors: vec![
                ("premium", premium as FieldExtractor),
                ("coverage", coverage),
                ("eligibility", adult_eligibility),
                ("riders", riders),
                ("exclusions", exclusions),
            ],
        }
    }

    /// The basic set plus every structural extractor
    pub fn extended() -> Self {
        let mut set = Self::basic();
        set.extractors.extend([
            ("child_eligibility", child_eligibility as FieldExtractor),
            ("waiting_period", waiting_period),
            ("operational_terms", operational_terms),
            ("identity", identity),
            ("structure", structure),
            ("payment_cadence", payment_cadence),
            ("payout_frequency", payout_frequency),
        ]);
        set
    }

    /// Build the set named by the configuration
    pub fn for_kind(kind: ExtractorSetKind) -> Self {
        match kind {
            ExtractorSetKind::Basic => Self::basic(),
            ExtractorSetKind::Extended => Self::extended(),
        }
    }

    /// Names of the extractors in the set
    pub fn names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|(name, _)| *name).collect()
    }

    /// Run every extractor and merge their outputs
    pub fn run(&self, text: &str) -> PartialFieldSet {
        let mut merged = PartialFieldSet::default();
        if text.trim().is_empty() {
            return merged;
        }
        for (name, extractor) in &self.extractors {
            let partial = extractor(text);
            let filled = partial.filled_fields();
            if filled.is_empty() {
                debug!(extractor = name, "No plausible value found");
            }
            merged.merge(partial);
        }
        merged
    }
}

/// Keep distinct values in first-seen order, at most `cap` of them
pub(crate) fn first_seen<I>(values: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut kept: Vec<String> = Vec::new();
    for value in values {
        if kept.len() >= cap {
            break;
        }
        if !kept.contains(&value) {
            kept.push(value);
        }
    }
    kept
}

/// `Some(values)` if non-empty
pub(crate) fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
