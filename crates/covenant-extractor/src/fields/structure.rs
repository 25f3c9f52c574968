//! Structural attributes: cover types and independent feature detectors

use super::non_empty;
use covenant_domain::PartialFieldSet;
use regex::Regex;
use std::sync::LazyLock;

static COVER_TYPES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("Level Sum Assured", r"(?i)\blevel\s*sum\s*assured"),
        ("Decreasing Sum Assured", r"(?i)\bdecreasing\s*sum\s*assured"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).expect("cover type pattern")))
    .collect()
});

/// One presence test per boolean feature
struct Detectors {
    joint_life: Regex,
    surrender_value: Regex,
    maturity_benefit: Regex,
    death_benefit: Regex,
    accidental_death: Regex,
    policy_loan: Regex,
    revival: Regex,
    return_of_purchase_price: Regex,
    top_up: Regex,
}

static DETECTORS: LazyLock<Detectors> = LazyLock::new(|| {
    let compile = |pattern: &str| Regex::new(pattern).expect("feature pattern");
    Detectors {
        joint_life: compile(r"(?i)\bjoint\s*life\b"),
        surrender_value: compile(r"(?i)\bsurrender\s*value\b"),
        maturity_benefit: compile(r"(?i)\bmaturity\s*benefit"),
        death_benefit: compile(r"(?i)\bdeath\s*benefit"),
        accidental_death: compile(r"(?i)\baccidental\s*death\s*benefit|\badb\b"),
        policy_loan: compile(r"(?i)\bpolicy\s*loans?\b|\bloans?\s*against\s*(?:the\s*)?policy"),
        revival: compile(r"(?i)\brevival\s*(?:allowed|period|of\s*(?:a\s*|the\s*)?(?:lapsed\s*)?polic(?:y|ies))"),
        return_of_purchase_price: compile(r"(?i)\breturn\s*of\s*purchase\s*price\b|\brop\b"),
        top_up: compile(r"(?i)\btop[\s-]?up\b"),
    }
});

/// `Some(true)` when the feature is mentioned, `None` otherwise
fn detect(pattern: &Regex, text: &str) -> Option<bool> {
    pattern.is_match(text).then_some(true)
}

/// Cover types and boolean plan features
///
/// Each detector is independent; any combination can be true at once.
pub fn structure(text: &str) -> PartialFieldSet {
    let cover_types = COVER_TYPES
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(label, _)| label.to_string())
        .collect();

    let d = &*DETECTORS;
    PartialFieldSet {
        cover_types: non_empty(cover_types),
        joint_life_available: detect(&d.joint_life, text),
        surrender_value_available: detect(&d.surrender_value, text),
        maturity_benefit: detect(&d.maturity_benefit, text),
        death_benefit: detect(&d.death_benefit, text),
        has_accidental_death_benefit: detect(&d.accidental_death, text),
        policy_loan_available: detect(&d.policy_loan, text),
        revival_allowed: detect(&d.revival, text),
        return_of_purchase_price: detect(&d.return_of_purchase_price, text),
        top_up_option: detect(&d.top_up, text),
        ..Default::default()
    }
}
