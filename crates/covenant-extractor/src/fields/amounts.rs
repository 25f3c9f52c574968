//! Premium and coverage amounts

use super::non_empty;
use covenant_domain::fields::{Plausibility, COVERAGE_RANGE, MAX_PREMIUMS, MAX_SUM_ASSURED, PREMIUM_RANGE};
use covenant_domain::PartialFieldSet;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

const AMOUNT: &str = r"(\d[\d,]*(?:\.\d+)?)";
const MAGNITUDE: &str = r"\s*(lakhs?|lacs?|crores?|cr|l|k)?\b";

static COVERAGE_CUED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:sum\s+(?:assured|insured)|cover(?:age)?\s+amount|coverage|cover\s+of)\b[^\d\n]{{0,30}}?{AMOUNT}{MAGNITUDE}"
    ))
    .expect("coverage pattern")
});

static COVERAGE_SCALED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i){AMOUNT}\s*(lakhs?|lacs?|crores?|cr|l)\b")).expect("scaled amount pattern")
});

static PREMIUM_CUED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:premium|annual|yearly)\b[^\d\n]{{0,25}}?{AMOUNT}{MAGNITUDE}"
    ))
    .expect("premium pattern")
});

static PREMIUM_CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:rs\.?|₹|inr)\s*{AMOUNT}{MAGNITUDE}\s*(?:/-)?\s*(?:per\s*(?:year|annum)|p\.\s*a\.|/\s*(?:year|yr|annum)|annually)"
    ))
    .expect("premium currency pattern")
});

static PREMIUM_TRAILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i){AMOUNT}\s*(?:rs\.?|₹|rupees?)\s*(?:per\s*(?:year|annum))"))
        .expect("premium trailing pattern")
});

/// Multiplier for a magnitude suffix
fn multiplier(magnitude: Option<&str>) -> u64 {
    match magnitude.map(|m| m.to_ascii_lowercase()).as_deref() {
        Some("lakh" | "lakhs" | "lac" | "lacs" | "l") => 100_000,
        Some("crore" | "crores" | "cr") => 10_000_000,
        Some("k") => 1_000,
        _ => 1,
    }
}

/// Parse a number with optional digit-group commas and decimal part, scaled by its suffix
///
/// ```
/// use covenant_extractor::fields::parse_amount;
///
/// assert_eq!(parse_amount("5,00,000", None), Some(500_000));
/// assert_eq!(parse_amount("1.5", Some("crore")), Some(15_000_000));
/// assert_eq!(parse_amount("5", Some("Lakh")), Some(500_000));
/// ```
pub fn parse_amount(number: &str, magnitude: Option<&str>) -> Option<u64> {
    let cleaned: String = number.chars().filter(|c| *c != ',').collect();
    let value: f64 = cleaned.trim_end_matches('.').parse().ok()?;
    let scaled = value * multiplier(magnitude) as f64;
    if !scaled.is_finite() || scaled < 0.0 || scaled >= u64::MAX as f64 {
        return None;
    }
    Some(scaled.round() as u64)
}

/// Scan `patterns`, keep distinct plausible amounts, smallest `cap` ascending
fn collect_amounts(text: &str, patterns: &[&Regex], range: Plausibility, cap: usize) -> Vec<u64> {
    let mut found = BTreeSet::new();
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            let Some(number) = caps.get(1) else { continue };
            let magnitude = caps.get(2).map(|m| m.as_str());
            if let Some(value) = parse_amount(number.as_str(), magnitude) {
                if range.contains(value) {
                    found.insert(value);
                }
            }
        }
    }
    found.into_iter().take(cap).collect()
}

/// Annual premium amounts near premium or currency cues
pub fn premium(text: &str) -> PartialFieldSet {
    let amounts = collect_amounts(
        text,
        &[&PREMIUM_CUED, &PREMIUM_CURRENCY, &PREMIUM_TRAILING],
        PREMIUM_RANGE,
        MAX_PREMIUMS,
    );
    PartialFieldSet {
        premium_amounts: non_empty(amounts),
        ..Default::default()
    }
}

/// Sum assured options near coverage cues or with lakh/crore magnitudes
pub fn coverage(text: &str) -> PartialFieldSet {
    let amounts = collect_amounts(
        text,
        &[&COVERAGE_CUED, &COVERAGE_SCALED],
        COVERAGE_RANGE,
        MAX_SUM_ASSURED,
    );
    PartialFieldSet {
        sum_assured_options: non_empty(amounts),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_assured_lakh() {
        let partial = coverage("Sum Assured 5 Lakh");
        assert_eq!(partial.sum_assured_options, Some(vec![500_000]));
    }

    #[test]
    fn test_coverage_range_and_crore() {
        let partial = coverage("Sum Assured: Rs 50 Lakh to 2 Crore");
        assert_eq!(partial.sum_assured_options, Some(vec![5_000_000, 20_000_000]));
    }

    #[test]
    fn test_coverage_indian_grouping() {
        let partial = coverage("Minimum Sum Insured of Rs. 3,00,000");
        assert_eq!(partial.sum_assured_options, Some(vec![300_000]));
    }

    #[test]
    fn test_coverage_decimal_crore_and_short_suffix() {
        let partial = coverage("Cover of 1.5 crore or 25L");
        assert_eq!(partial.sum_assured_options, Some(vec![2_500_000, 15_000_000]));
    }

    #[test]
    fn test_coverage_discards_implausible() {
        // 500 crore is above the ceiling, 10 is below the floor
        let partial = coverage("Sum Assured 500 crore. Coverage 10");
        assert_eq!(partial.sum_assured_options, None);
    }

    #[test]
    fn test_coverage_caps_smallest_ten() {
        let text: String = (1..=15).map(|n| format!("{} lakh, ", n)).collect();
        let values = coverage(&text).sum_assured_options.unwrap();
        assert_eq!(values.len(), MAX_SUM_ASSURED);
        assert_eq!(values[0], 100_000);
        assert_eq!(*values.last().unwrap(), 1_000_000);
    }

    #[test]
    fn test_premium_cues() {
        let partial = premium("Annual premium Rs 12,500. Yearly premium: 7500");
        assert_eq!(partial.premium_amounts, Some(vec![7_500, 12_500]));
    }

    #[test]
    fn test_premium_currency_per_annum() {
        let partial = premium("Starting at ₹ 8,999 per annum for a healthy adult");
        assert_eq!(partial.premium_amounts, Some(vec![8_999]));
    }

    #[test]
    fn test_premium_rejects_out_of_range() {
        let partial = premium("Premium 50 and premium 90,00,000");
        assert_eq!(partial.premium_amounts, None);
    }

    #[test]
    fn test_premium_dedups() {
        let partial = premium("premium 5000, annual 5,000, yearly 5000");
        assert_eq!(partial.premium_amounts, Some(vec![5_000]));
    }

    #[test]
    fn test_no_amounts_in_prose() {
        assert_eq!(premium("A comprehensive family health plan").premium_amounts, None);
        assert_eq!(coverage("A comprehensive family health plan").sum_assured_options, None);
    }

    #[test]
    fn test_multiplier_table() {
        assert_eq!(multiplier(Some("LACS")), 100_000);
        assert_eq!(multiplier(Some("cr")), 10_000_000);
        assert_eq!(multiplier(Some("K")), 1_000);
        assert_eq!(multiplier(None), 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extracted_amounts_always_in_range(text in "[a-zA-Z0-9 ,.₹]{0,200}") {
                if let Some(values) = premium(&text).premium_amounts {
                    prop_assert!(values.iter().all(|v| PREMIUM_RANGE.contains(*v)));
                    prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
                    prop_assert!(values.len() <= MAX_PREMIUMS);
                }
                if let Some(values) = coverage(&text).sum_assured_options {
                    prop_assert!(values.iter().all(|v| COVERAGE_RANGE.contains(*v)));
                    prop_assert!(values.len() <= MAX_SUM_ASSURED);
                }
            }

            #[test]
            fn lakh_amounts_scale(n in 1u64..=999) {
                let values = coverage(&format!("Sum Assured {} lakh", n)).sum_assured_options;
                prop_assert_eq!(values, Some(vec![n * 100_000]));
            }
        }
    }
}
