//! Typed search criteria.
//!
//! Query-string values arrive as loose strings. `Criteria::parse` turns them
//! into a list of `Criterion` values in one step, so the engine never deals
//! with string coercion. Values that fail to parse are kept as
//! `Parsed::Malformed` and match nothing.

use std::collections::HashMap;

use crate::types::{Unicorn, normalize_gender_code};

/// Raw query-string parameters: option name to string value.
pub type RawCriteria = HashMap<String, String>;

/// Query keys the engine understands. Anything else is ignored.
pub const CRITERION_KEYS: [&str; 8] = [
    "name",
    "loves",
    "gender",
    "weightGreaterThan",
    "weightLessThan",
    "vampiresExists",
    "vampiresGreaterThan",
    "vaccinated",
];

/// A criterion value that either parsed or did not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed<T> {
    Valid(T),
    /// Fails closed: the criterion excludes every record.
    Malformed,
}

impl<T: Copy> Parsed<T> {
    /// True only if the value parsed and `check` accepts it.
    fn holds(self, check: impl FnOnce(T) -> bool) -> bool {
        match self {
            Self::Valid(value) => check(value),
            Self::Malformed => false,
        }
    }
}

/// One independently evaluated filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Case-insensitive substring of the name. Holds the lower-cased needle.
    NameContains(String),
    /// Every listed love must be present. Holds lower-cased items.
    LovesAll(Vec<String>),
    /// Normalized gender code to compare against.
    Gender(String),
    WeightGreaterThan(Parsed<f64>),
    WeightLessThan(Parsed<f64>),
    VampiresExists(Parsed<bool>),
    /// Requires `vampires` to be present as well as greater.
    VampiresGreaterThan(Parsed<i64>),
    Vaccinated(Parsed<bool>),
}

impl Criterion {
    /// Build the criterion for a recognized key.
    ///
    /// Returns `None` for unknown keys and for empty values.
    #[must_use]
    pub fn parse(key: &str, value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        let criterion = match key {
            "name" => Self::NameContains(value.to_lowercase()),
            "loves" => Self::LovesAll(
                value
                    .split(',')
                    .map(|item| item.trim().to_lowercase())
                    .filter(|item| !item.is_empty())
                    .collect(),
            ),
            "gender" => Self::Gender(normalize_gender_code(value)),
            "weightGreaterThan" => Self::WeightGreaterThan(parse_float(value)),
            "weightLessThan" => Self::WeightLessThan(parse_float(value)),
            "vampiresExists" => Self::VampiresExists(parse_flag(value)),
            "vampiresGreaterThan" => Self::VampiresGreaterThan(parse_integer(value)),
            "vaccinated" => Self::Vaccinated(parse_flag(value)),
            _ => return None,
        };
        Some(criterion)
    }

    /// Check whether `unicorn` satisfies this criterion.
    #[must_use]
    pub fn matches(&self, unicorn: &Unicorn) -> bool {
        match self {
            Self::NameContains(needle) => unicorn.name.to_lowercase().contains(needle.as_str()),
            Self::LovesAll(wanted) => {
                let loves: Vec<String> = unicorn.loves.iter().map(|l| l.to_lowercase()).collect();
                wanted.iter().all(|love| loves.contains(love))
            }
            Self::Gender(code) => unicorn.gender.code() == code.as_str(),
            Self::WeightGreaterThan(bound) => bound.holds(|b| unicorn.weight > b),
            Self::WeightLessThan(bound) => bound.holds(|b| unicorn.weight < b),
            Self::VampiresExists(flag) => flag.holds(|b| unicorn.vampires.is_some() == b),
            Self::VampiresGreaterThan(bound) => bound.holds(|b| {
                unicorn
                    .vampires
                    .is_some_and(|v| i128::from(v) > i128::from(b))
            }),
            Self::Vaccinated(flag) => flag.holds(|b| unicorn.vaccinated == b),
        }
    }
}

fn parse_float(value: &str) -> Parsed<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Parsed::Valid(n),
        _ => Parsed::Malformed,
    }
}

fn parse_integer(value: &str) -> Parsed<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_or(Parsed::Malformed, Parsed::Valid)
}

fn parse_flag(value: &str) -> Parsed<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Parsed::Valid(true)
    } else if value.eq_ignore_ascii_case("false") {
        Parsed::Valid(false)
    } else {
        Parsed::Malformed
    }
}

/// A conjunction of criteria.
///
/// An empty `Criteria` matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub criteria: Vec<Criterion>,
}

impl Criteria {
    /// Create criteria that match everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw query parameters.
    ///
    /// Criteria are produced in `CRITERION_KEYS` order. Unknown keys and
    /// empty values are skipped.
    #[must_use]
    pub fn parse(raw: &RawCriteria) -> Self {
        let criteria = CRITERION_KEYS
            .iter()
            .filter_map(|key| {
                raw.get(*key)
                    .and_then(|value| Criterion::parse(key, value))
            })
            .collect();
        Self { criteria }
    }

    /// Add a criterion.
    #[cfg(test)]
    #[must_use]
    pub fn with(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// True if `unicorn` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, unicorn: &Unicorn) -> bool {
        self.criteria.iter().all(|c| c.matches(unicorn))
    }

    /// Number of applied criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// True if no criterion is applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}
