//! Field schema - every factual field of a policy record
//!
//! Each field has a declared default and, where numeric, a declared
//! plausibility range. Extractors never produce a `FieldSet` directly; they
//! produce a [`PartialFieldSet`] whose filled slots overwrite the defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive numeric range a candidate value must fall within to be accepted
///
/// Values outside the range are discarded, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plausibility {
    /// Smallest accepted value
    pub min: u64,
    /// Largest accepted value
    pub max: u64,
}

impl Plausibility {
    /// Create a new range
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Whether a candidate lies within the range
    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Annual premium amounts
pub const PREMIUM_RANGE: Plausibility = Plausibility::new(500, 5_000_000);
/// Sum assured / sum insured amounts
pub const COVERAGE_RANGE: Plausibility = Plausibility::new(100_000, 100_000_000);
/// Premium quoted next to a rider name
pub const RIDER_PREMIUM_RANGE: Plausibility = Plausibility::new(100, 100_000);
/// Initial waiting period, in days
pub const WAITING_DAYS_RANGE: Plausibility = Plausibility::new(0, 365);
/// Pre-existing disease waiting period, in months
pub const PRE_EXISTING_MONTHS_RANGE: Plausibility = Plausibility::new(0, 60);
/// Free-look period, in days
pub const FREE_LOOK_RANGE: Plausibility = Plausibility::new(1, 60);
/// Grace period, in days
pub const GRACE_PERIOD_RANGE: Plausibility = Plausibility::new(1, 90);

/// Lowest adult entry age after clamping
pub const ADULT_AGE_FLOOR: u32 = 12;
/// Highest adult age after clamping
pub const ADULT_AGE_CEILING: u32 = 99;
/// Lowest child age after clamping
pub const CHILD_AGE_FLOOR: u32 = 0;
/// Highest child age after clamping
pub const CHILD_AGE_CEILING: u32 = 30;

/// Maximum premium amounts retained
pub const MAX_PREMIUMS: usize = 6;
/// Maximum sum assured options retained
pub const MAX_SUM_ASSURED: usize = 10;
/// Maximum riders retained
pub const MAX_RIDERS: usize = 3;
/// Maximum exclusions retained
pub const MAX_EXCLUSIONS: usize = 5;
/// Maximum premium payment modes retained
pub const MAX_PAYMENT_MODES: usize = 6;
/// Maximum payout frequencies retained
pub const MAX_PAYOUT_FREQUENCIES: usize = 4;

/// Premium assigned to a rider when none is quoted near its name
pub const DEFAULT_RIDER_PREMIUM: u64 = 2500;
/// UIN placeholder when none is found
pub const UNSPECIFIED_UIN: &str = "UNSPECIFIED";

/// Inclusive age interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    /// Minimum age in years
    pub min_age: u32,
    /// Maximum age in years
    pub max_age: u32,
}

impl AgeRange {
    /// Create a range without clamping
    pub const fn new(min_age: u32, max_age: u32) -> Self {
        Self { min_age, max_age }
    }

    /// Build a range from two bounds in any order, clamped into `[floor, ceiling]`
    pub fn clamped(a: u32, b: u32, floor: u32, ceiling: u32) -> Self {
        let lo = a.min(b).clamp(floor, ceiling);
        let hi = a.max(b).clamp(floor, ceiling);
        Self::new(lo, hi.max(lo))
    }

    /// Whether the range is ordered and within `[floor, ceiling]`
    pub fn is_within(&self, floor: u32, ceiling: u32) -> bool {
        self.min_age <= self.max_age && self.min_age >= floor && self.max_age <= ceiling
    }
}

/// An optional rider offered with a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rider {
    /// Canonical rider name
    pub name: String,
    /// Quoted premium, or the default rider premium
    pub premium: u64,
}

impl Rider {
    /// Create a new rider
    pub fn new(name: impl Into<String>, premium: u64) -> Self {
        Self {
            name: name.into(),
            premium,
        }
    }
}

/// Waiting periods before cover starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingPeriod {
    /// Initial waiting period in days
    pub initial_days: u32,
    /// Waiting period for pre-existing diseases in months
    pub pre_existing_months: u32,
}

macro_rules! field_schema {
    ($( $(#[$meta:meta])* $name:ident : $ty:ty = $default:expr ),+ $(,)?) => {
        /// Every factual field of a policy, always populated
        ///
        /// A field either carries an extracted, range-valid value or its
        /// documented default. It is never absent.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct FieldSet {
            $( $(#[$meta])* pub $name: $ty, )+
        }

        impl Default for FieldSet {
            /// All documented defaults
            fn default() -> Self {
                Self {
                    $( $name: $default, )+
                }
            }
        }

        /// Output of one or more field extractors
        ///
        /// `None` means "nothing plausible found"; the default applies.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct PartialFieldSet {
            $( $(#[$meta])* pub $name: Option<$ty>, )+
        }

        impl FieldSet {
            /// Serialized names of every field in the schema
            pub const FIELD_NAMES: &'static [&'static str] = &[ $( stringify!($name), )+ ];

            /// Overwrite defaults with every filled slot of `partial`
            pub fn apply(&mut self, partial: PartialFieldSet) {
                $(
                    if let Some(value) = partial.$name {
                        self.$name = value;
                    }
                )+
            }
        }

        impl PartialFieldSet {
            /// Names of the slots that carry a value
            pub fn filled_fields(&self) -> Vec<&'static str> {
                let mut filled = Vec::new();
                $(
                    if self.$name.is_some() {
                        filled.push(stringify!($name));
                    }
                )+
                filled
            }

            /// Names of the slots still empty
            pub fn missing_fields(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $(
                    if self.$name.is_none() {
                        missing.push(stringify!($name));
                    }
                )+
                missing
            }

            /// Combine with the output of another extractor
            ///
            /// Extractors target disjoint fields, so a filled slot in
            /// `other` only ever lands on an empty slot here.
            pub fn merge(&mut self, other: PartialFieldSet) {
                $(
                    if other.$name.is_some() {
                        self.$name = other.$name;
                    }
                )+
            }
        }
    };
}

field_schema! {
    /// Annual premium amounts, ascending
    premium_amounts: Vec<u64> = vec![5_000, 7_500],
    /// Sum assured options, ascending
    sum_assured_options: Vec<u64> = vec![250_000, 500_000, 1_000_000],
    /// Adult eligibility age range
    eligibility: AgeRange = AgeRange::new(18, 65),
    /// Child (dependent) eligibility age range
    child_eligibility: AgeRange = AgeRange::new(3, 25),
    /// Riders offered
    riders: Vec<Rider> = vec![Rider::new("Critical Illness", 3_000)],
    /// Exclusions listed
    exclusions: Vec<String> = vec![
        "Cosmetic procedures".to_string(),
        "Self-inflicted injuries".to_string(),
        "Dental treatment (unless accident-related)".to_string(),
    ],
    /// Waiting periods
    waiting_period: WaitingPeriod = WaitingPeriod { initial_days: 30, pre_existing_months: 24 },
    /// Free-look period in days
    free_look_period_days: u32 = 15,
    /// Grace period in days
    grace_period_days: u32 = 30,
    /// Unique identification number issued by the regulator
    uin: String = UNSPECIFIED_UIN.to_string(),
    /// Product traits (non-linked, non-participating, pure risk)
    product_traits: Vec<String> = Vec::new(),
    /// Cover types (level / decreasing sum assured)
    cover_types: Vec<String> = Vec::new(),
    /// Joint-life cover can be chosen
    joint_life_available: bool = false,
    /// Policy acquires a surrender value
    surrender_value_available: bool = false,
    /// A maturity benefit is paid
    maturity_benefit: bool = false,
    /// A death benefit is paid
    death_benefit: bool = false,
    /// An accidental-death benefit is offered
    has_accidental_death_benefit: bool = false,
    /// Loans against the policy are allowed
    policy_loan_available: bool = false,
    /// Lapsed policies can be revived
    revival_allowed: bool = false,
    /// Purchase price is returned (annuities)
    return_of_purchase_price: bool = false,
    /// Top-up premiums are accepted
    top_up_option: bool = false,
    /// Premium payment cadences, in first-seen order
    premium_payment_modes: Vec<String> = Vec::new(),
    /// Annuity payout frequencies, in first-seen order
    annuity_payout_frequency: Vec<String> = Vec::new(),
}

/// Name of the derived premium table on a record
pub const PREMIUM_TABLE_FIELD: &str = "premium_yearly";

impl FieldSet {
    /// Build a field set from defaults plus extractor output
    pub fn from_partial(partial: PartialFieldSet) -> Self {
        let mut fields = Self::default();
        fields.apply(partial);
        fields
    }

    /// Whether `key` names a factual field (including the derived premium table)
    pub fn owns(key: &str) -> bool {
        key == PREMIUM_TABLE_FIELD || Self::FIELD_NAMES.contains(&key)
    }

    /// Premium table keyed by coverage level
    ///
    /// Pairs ascending coverage levels with ascending premiums position by
    /// position. Both lists are always non-empty, so the table always has at
    /// least one entry.
    pub fn premium_table(&self) -> BTreeMap<u64, u64> {
        let mut coverage = self.sum_assured_options.clone();
        coverage.sort_unstable();
        let mut premiums = self.premium_amounts.clone();
        premiums.sort_unstable();

        coverage
            .into_iter()
            .zip(premiums)
            .collect()
    }

    /// Lowest annual premium, used by downstream premium estimation
    pub fn min_premium(&self) -> Option<u64> {
        self.premium_amounts.iter().copied().min()
    }
}
