//! Operational terms and product identity

use super::non_empty;
use covenant_domain::fields::{Plausibility, FREE_LOOK_RANGE, GRACE_PERIOD_RANGE};
use covenant_domain::PartialFieldSet;
use regex::Regex;
use std::sync::LazyLock;

static FREE_LOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfree[\s-]*look(?:\s*period)?\b[^.\n\d]{0,20}(\d{1,3})\s*days").expect("free look pattern")
});

static GRACE_PERIOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bgrace\s*period\b[^.\n\d]{0,20}(\d{1,3})\s*days").expect("grace period pattern")
});

// The cue is case-insensitive; the identifier itself is upper-case
static UIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:\bUIN\b\s*(?:no\.?|number)?\s*[:\-]?\s*)([A-Z0-9]{5,})").expect("uin pattern")
});

static PRODUCT_TRAITS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("non-linked", r"(?i)\bnon[\s-]*linked\b"),
        ("non-participating", r"(?i)\bnon[\s-]*(?:participating|par)\b"),
        ("pure risk", r"(?i)\b(?:pure\s*risk|term\s*plan)\b"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).expect("product trait pattern")))
    .collect()
});

fn days(pattern: &Regex, text: &str, range: Plausibility) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .filter(|days| range.contains(*days as u64))
}

/// Free-look and grace periods
pub fn operational_terms(text: &str) -> PartialFieldSet {
    PartialFieldSet {
        free_look_period_days: days(&FREE_LOOK, text, FREE_LOOK_RANGE),
        grace_period_days: days(&GRACE_PERIOD, text, GRACE_PERIOD_RANGE),
        ..Default::default()
    }
}

/// Regulator UIN and product traits
pub fn identity(text: &str) -> PartialFieldSet {
    let uin = UIN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let traits = PRODUCT_TRAITS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(label, _)| label.to_string())
        .collect();

    PartialFieldSet {
        uin,
        product_traits: non_empty(traits),
        ..Default::default()
    }
}
