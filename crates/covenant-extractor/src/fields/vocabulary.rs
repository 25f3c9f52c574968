//! Rider and exclusion vocabularies

use super::non_empty;
use covenant_domain::fields::{DEFAULT_RIDER_PREMIUM, MAX_EXCLUSIONS, MAX_RIDERS, RIDER_PREMIUM_RANGE};
use covenant_domain::{PartialFieldSet, Rider};
use regex::Regex;
use std::sync::LazyLock;

/// Canonical rider names and the phrases that identify them
static RIDER_VOCABULARY: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("Critical Illness", r"(?i)\bcritical\s*illness"),
        ("Accidental Death", r"(?i)\baccidental\s*death\s*(?:benefit\s*)?rider"),
        ("Personal Accident", r"(?i)\bpersonal\s*accident"),
        ("Waiver of Premium", r"(?i)\bwaiver\s*of\s*premium"),
        ("Hospital Cash", r"(?i)\b(?:hospital|daily)\s*cash"),
        ("Term Rider", r"(?i)\bterm\s*rider"),
        ("Top-up Cover", r"(?i)\btop[\s-]?up\s*(?:cover|rider)"),
        ("Family Income Benefit", r"(?i)\bfamily\s*income\s*benefit"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("rider pattern")))
    .collect()
});

/// Premium quoted shortly after a rider phrase
static RIDER_PREMIUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[^.\n]{0,40}?(?:\bpremium|\bcost|\brs\b\.?|₹)\s*(?:of\s*)?[:\-]?\s*(?:rs\.?|₹)?\s*(\d[\d,]*)")
        .expect("rider premium pattern")
});

/// Canonical exclusion labels and the phrases that identify them, in reporting order
static EXCLUSION_VOCABULARY: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("Suicide", r"(?i)\bsuicide"),
        ("Pre-existing diseases", r"(?i)\bpre[\s-]*existing"),
        ("War", r"(?i)\bwar\b"),
        ("Terrorism", r"(?i)\bterroris[mt]"),
        ("Nuclear", r"(?i)\bnuclear"),
        ("Cosmetic procedures", r"(?i)\bcosmetic"),
        ("Dental", r"(?i)\bdental"),
        ("Maternity", r"(?i)\bmaternity"),
        ("Self-inflicted injuries", r"(?i)\bself[\s-]*inflicted"),
        ("Hazardous activities", r"(?i)\bhazardous"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).expect("exclusion pattern")))
    .collect()
});

fn rider_premium(after: &str) -> u64 {
    RIDER_PREMIUM
        .captures(after)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse::<u64>().ok())
        .filter(|premium| RIDER_PREMIUM_RANGE.contains(*premium))
        .unwrap_or(DEFAULT_RIDER_PREMIUM)
}

/// Riders named in the text, in order of first mention, at most three
pub fn riders(text: &str) -> PartialFieldSet {
    let mut mentions: Vec<(usize, Rider)> = RIDER_VOCABULARY
        .iter()
        .filter_map(|(name, pattern)| {
            let found = pattern.find(text)?;
            let premium = rider_premium(&text[found.end()..]);
            Some((found.start(), Rider::new(*name, premium)))
        })
        .collect();
    mentions.sort_by_key(|(position, _)| *position);

    let riders = mentions.into_iter().map(|(_, rider)| rider).take(MAX_RIDERS).collect();
    PartialFieldSet {
        riders: non_empty(riders),
        ..Default::default()
    }
}

/// Exclusions present in the text, in vocabulary order, at most five
pub fn exclusions(text: &str) -> PartialFieldSet {
    let found = EXCLUSION_VOCABULARY
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(label, _)| label.to_string())
        .take(MAX_EXCLUSIONS)
        .collect();
    PartialFieldSet {
        exclusions: non_empty(found),
        ..Default::default()
    }
}
