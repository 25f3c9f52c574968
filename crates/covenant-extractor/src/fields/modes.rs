//! Premium payment cadence and annuity payout frequency

use super::{first_seen, non_empty};
use covenant_domain::fields::{MAX_PAYMENT_MODES, MAX_PAYOUT_FREQUENCIES};
use covenant_domain::PartialFieldSet;
use regex::Regex;
use std::sync::LazyLock;

static PAYMENT_MODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(single|limited|regular)\s*(?:pay|payment|premium)|(monthly|quarterly|half[\s-]?yearly|yearly|annual(?:ly)?))\b",
    )
    .expect("payment mode pattern")
});

static PAYOUT_FREQUENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(monthly|quarterly|half[\s-]?yearly|yearly|annually)\b").expect("payout frequency pattern")
});

/// Canonical spelling of a cadence word
fn canonical(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.starts_with("half") {
        "half-yearly".to_string()
    } else if lower.starts_with("annual") {
        "yearly".to_string()
    } else {
        lower
    }
}

/// Premium payment modes in first-seen order, at most six
pub fn payment_cadence(text: &str) -> PartialFieldSet {
    let modes = PAYMENT_MODE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| canonical(m.as_str()));
    PartialFieldSet {
        premium_payment_modes: non_empty(first_seen(modes, MAX_PAYMENT_MODES)),
        ..Default::default()
    }
}

/// Annuity payout frequencies in first-seen order, at most four
pub fn payout_frequency(text: &str) -> PartialFieldSet {
    let frequencies = PAYOUT_FREQUENCY
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| canonical(m.as_str()));
    PartialFieldSet {
        annuity_payout_frequency: non_empty(first_seen(frequencies, MAX_PAYOUT_FREQUENCIES)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_modes_first_seen_order() {
        let partial = payment_cadence("Pay monthly or yearly. Single pay, limited pay and regular premium options. Annual mode.");
        assert_eq!(
            partial.premium_payment_modes,
            Some(vec![
                "monthly".to_string(),
                "yearly".to_string(),
                "single".to_string(),
                "limited".to_string(),
                "regular".to_string(),
            ])
        );
    }

    #[test]
    fn test_payment_modes_need_pay_cue_for_term_words() {
        assert_eq!(payment_cadence("a single policy for regular people").premium_payment_modes, None);
    }

    #[test]
    fn test_payment_modes_capped() {
        let partial = payment_cadence(
            "single premium, limited pay, regular pay, monthly, quarterly, half yearly, yearly",
        );
        let modes = partial.premium_payment_modes.unwrap();
        assert_eq!(modes.len(), MAX_PAYMENT_MODES);
        assert_eq!(modes[5], "half-yearly");
    }

    #[test]
    fn test_payout_frequency_normalizes() {
        let partial = payout_frequency("Annuity paid Annually, Half-Yearly, Quarterly or Monthly; annually again");
        assert_eq!(
            partial.annuity_payout_frequency,
            Some(vec![
                "yearly".to_string(),
                "half-yearly".to_string(),
                "quarterly".to_string(),
                "monthly".to_string(),
            ])
        );
    }
}
