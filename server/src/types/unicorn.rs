//! The unicorn record and its normalized field types.

use std::fmt;

use serde::Serialize;

use super::ids::UnicornId;

/// Normalized gender code.
///
/// Stored and compared as the single-character codes `"m"` and `"f"`.
/// Input accepts the synonyms `"male"` and `"female"` in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

impl Gender {
    /// Parse a gender from user input.
    ///
    /// Returns `None` for anything other than `m`, `f`, `male`, `female`
    /// (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match normalize_gender_code(input).as_str() {
            "m" => Some(Self::Male),
            "f" => Some(Self::Female),
            _ => None,
        }
    }

    /// The canonical single-character code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Lower-case a gender string and fold the long synonyms onto their codes.
///
/// Unknown values pass through lower-cased so callers can still compare them.
#[must_use]
pub fn normalize_gender_code(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    match lowered.as_str() {
        "male" => "m".to_owned(),
        "female" => "f".to_owned(),
        _ => lowered,
    }
}

/// A unicorn record.
///
/// # Invariants
///
/// - `dob` is an ISO-8601 UTC timestamp with millisecond precision.
/// - `loves` is never empty.
/// - `weight` is finite.
/// - `vampires`, when present, is a real count; `None` means the count does
///   not exist, which is not the same as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(clippy::disallowed_methods)] // Clone needed to hand records out of the store
pub struct Unicorn {
    #[serde(rename = "_id")]
    pub id: UnicornId,
    pub name: String,
    pub dob: String,
    pub loves: Vec<String>,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vampires: Option<u64>,
    pub gender: Gender,
    pub vaccinated: bool,
}

impl Unicorn {
    /// Case-insensitive comparison against this record's name.
    ///
    /// Stored names are trimmed, so the lookup key is trimmed too.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
