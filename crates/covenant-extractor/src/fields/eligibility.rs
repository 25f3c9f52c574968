//! Age ranges and waiting periods

use covenant_domain::fields::{
    ADULT_AGE_CEILING, ADULT_AGE_FLOOR, CHILD_AGE_CEILING, CHILD_AGE_FLOOR, PRE_EXISTING_MONTHS_RANGE,
    WAITING_DAYS_RANGE,
};
use covenant_domain::{AgeRange, FieldSet, PartialFieldSet, WaitingPeriod};
use regex::Regex;
use std::sync::LazyLock;

const SEPARATOR: &str = r"\s*(?:to|–|-|—)\s*";

static ENTRY_AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:entry\s*age|age\s*range|age\s*at\s*entry)[\s:]*?(?:of\s*)?(\d{{1,2}}){SEPARATOR}(\d{{1,2}})"
    ))
    .expect("entry age pattern")
});

static AGE_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(\d{{1,2}}){SEPARATOR}(\d{{1,2}})\s*(?:years?|yrs?)\b")).expect("age years pattern")
});

static CHILD_AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:child(?:ren)?|dependent\s+child(?:ren)?|kids?)\b[^.\n\d]{{0,40}}(\d{{1,3}})\s*(days?|months?|years?|yrs?)?{SEPARATOR}(\d{{1,2}})\s*(?:years?|yrs?)"
    ))
    .expect("child age pattern")
});

static INITIAL_WAITING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bwaiting\s*period\b[^.\n\d]{0,20}(\d{1,3})\s*days").expect("waiting period pattern")
});

static PRE_EXISTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pre[\s-]*existing[^.\n\d]{0,60}(\d{1,2})\s*(months?|years?)").expect("pre-existing pattern")
});

fn parse_pair(a: &str, b: &str) -> Option<(u32, u32)> {
    Some((a.parse().ok()?, b.parse().ok()?))
}

/// Adult entry age range, clamped into a sane adult interval
pub fn adult_eligibility(text: &str) -> PartialFieldSet {
    let range = [&*ENTRY_AGE, &*AGE_YEARS].into_iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let (lo, hi) = parse_pair(caps.get(1)?.as_str(), caps.get(2)?.as_str())?;
        Some(AgeRange::clamped(lo, hi, ADULT_AGE_FLOOR, ADULT_AGE_CEILING))
    });
    PartialFieldSet {
        eligibility: range,
        ..Default::default()
    }
}

/// Dependent child age range; a lower bound in days or months means age 0
pub fn child_eligibility(text: &str) -> PartialFieldSet {
    let range = CHILD_AGE.captures(text).and_then(|caps| {
        let low_in_years = caps
            .get(2)
            .map(|unit| unit.as_str().to_ascii_lowercase().starts_with('y'))
            .unwrap_or(true);
        let (lo, hi) = parse_pair(caps.get(1)?.as_str(), caps.get(3)?.as_str())?;
        let lo = if low_in_years { lo } else { 0 };
        Some(AgeRange::clamped(lo, hi, CHILD_AGE_FLOOR, CHILD_AGE_CEILING))
    });
    PartialFieldSet {
        child_eligibility: range,
        ..Default::default()
    }
}

/// Initial and pre-existing-disease waiting periods
///
/// A period found for only one of the two parts keeps the default for the
/// other part.
pub fn waiting_period(text: &str) -> PartialFieldSet {
    let initial_days = INITIAL_WAITING
        .captures(text)
        .and_then(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .filter(|days| WAITING_DAYS_RANGE.contains(*days as u64));

    let pre_existing_months = PRE_EXISTING
        .captures(text)
        .and_then(|caps| {
            let value: u32 = caps.get(1)?.as_str().parse().ok()?;
            let in_years = caps.get(2)?.as_str().to_ascii_lowercase().starts_with('y');
            Some(if in_years { value * 12 } else { value })
        })
        .filter(|months| PRE_EXISTING_MONTHS_RANGE.contains(*months as u64));

    let period = if initial_days.is_none() && pre_existing_months.is_none() {
        None
    } else {
        let default = FieldSet::default().waiting_period;
        Some(WaitingPeriod {
            initial_days: initial_days.unwrap_or(default.initial_days),
            pre_existing_months: pre_existing_months.unwrap_or(default.pre_existing_months),
        })
    };

    PartialFieldSet {
        waiting_period: period,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_age() {
        let partial = adult_eligibility("Entry Age: 18 to 65 years");
        assert_eq!(partial.eligibility, Some(AgeRange::new(18, 65)));
    }

    #[test]
    fn test_age_years_fallback() {
        let partial = adult_eligibility("Available for people aged 21 - 55 yrs");
        assert_eq!(partial.eligibility, Some(AgeRange::new(21, 55)));
    }

    #[test]
    fn test_adult_age_clamped() {
        let partial = adult_eligibility("Entry age 5 to 70");
        assert_eq!(partial.eligibility, Some(AgeRange::new(12, 70)));

        let partial = adult_eligibility("age range 65 to 18");
        assert_eq!(partial.eligibility, Some(AgeRange::new(18, 65)));
    }

    #[test]
    fn test_no_age_expression() {
        assert_eq!(adult_eligibility("no ages here").eligibility, None);
    }

    #[test]
    fn test_child_age_in_days() {
        let partial = child_eligibility("Children: 91 days to 25 years");
        assert_eq!(partial.child_eligibility, Some(AgeRange::new(0, 25)));
    }

    #[test]
    fn test_child_age_in_years_clamped() {
        let partial = child_eligibility("Dependent children aged 3 years to 35 years");
        assert_eq!(partial.child_eligibility, Some(AgeRange::new(3, 30)));
    }

    #[test]
    fn test_waiting_period_both_parts() {
        let partial = waiting_period(
            "Initial waiting period of 30 days. Pre-existing diseases covered after 36 months.",
        );
        assert_eq!(
            partial.waiting_period,
            Some(WaitingPeriod {
                initial_days: 30,
                pre_existing_months: 36
            })
        );
    }

    #[test]
    fn test_waiting_period_years_and_partial_default() {
        let partial = waiting_period("Pre existing conditions are covered after 2 years");
        assert_eq!(
            partial.waiting_period,
            Some(WaitingPeriod {
                initial_days: 30,
                pre_existing_months: 24
            })
        );
    }

    #[test]
    fn test_waiting_period_out_of_range_dropped() {
        assert_eq!(waiting_period("waiting period: 900 days").waiting_period, None);
    }
}
