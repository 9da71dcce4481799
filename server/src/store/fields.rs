//! Coercion of raw request bodies into validated record fields.
//!
//! A create or update body arrives as a JSON object whose values may be
//! loosely typed (numbers as strings, a single love instead of a list, and so
//! on). This module turns such an object into a `NewUnicorn` or an
//! `UnicornPatch` in one pass, so the store never sees a half-parsed body.
//!
//! # Presence rules
//!
//! - A key that is absent or explicitly `null` is "not supplied".
//! - On create, an empty string counts as missing for `name`, `dob`, `loves`
//!   and `gender`.
//! - On update, an empty string for `dob`, `loves` or `gender` leaves the
//!   field untouched, and an empty string for `vampires` clears it.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::types::{Gender, Unicorn};

/// A raw request body: field name to loosely typed JSON value.
pub type RawFields = serde_json::Map<String, Value>;

/// Fields that must be supplied on create, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "dob", "loves", "weight", "gender"];

/// Naive date-time layouts accepted for `dob`, interpreted as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Errors produced while coercing a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// One or more required fields were not supplied.
    Missing(Vec<&'static str>),
    /// A supplied field could not be coerced to its type.
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl FieldError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Self::Invalid { field, message } => {
                write!(f, "Invalid value for {field}: {message}")
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// A fully validated record waiting for an id.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::disallowed_methods)] // Clone used by tests and seed loading
pub struct NewUnicorn {
    pub name: String,
    pub dob: String,
    pub loves: Vec<String>,
    pub weight: f64,
    pub vampires: Option<u64>,
    pub gender: Gender,
    pub vaccinated: bool,
}

impl NewUnicorn {
    /// Validate and normalize a create body.
    ///
    /// Missing required fields are reported together before any value is
    /// coerced. `vaccinated` defaults to `true`.
    pub fn from_fields(fields: &RawFields) -> Result<Self, FieldError> {
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .into_iter()
            .filter(|key| !is_supplied_for_create(fields, key))
            .collect();
        if !missing.is_empty() {
            return Err(FieldError::Missing(missing));
        }

        let name = parse_name(required(fields, "name")?)?;
        let dob = parse_dob(required(fields, "dob")?)?;
        let loves = parse_loves(required(fields, "loves")?)?;
        let weight = parse_weight(required(fields, "weight")?)?;
        let vampires = match fields.get("vampires") {
            Some(value) => parse_vampires(value)?,
            None => None,
        };
        let gender = parse_gender(required(fields, "gender")?)?;
        let vaccinated = match supplied(fields, "vaccinated") {
            Some(value) => parse_vaccinated(value)?,
            None => true,
        };

        Ok(Self {
            name,
            dob,
            loves,
            weight,
            vampires,
            gender,
            vaccinated,
        })
    }
}

/// A partial update. `None` means "leave the field alone".
///
/// `vampires` is doubly optional: `Some(None)` clears the count.
#[derive(Debug, Clone, Default, PartialEq)]
#[allow(clippy::disallowed_methods)]
#[allow(clippy::option_option)] // Distinguishes "untouched" from "cleared"
pub struct UnicornPatch {
    pub dob: Option<String>,
    pub loves: Option<Vec<String>>,
    pub weight: Option<f64>,
    pub vampires: Option<Option<u64>>,
    pub gender: Option<Gender>,
    pub vaccinated: Option<bool>,
}

impl UnicornPatch {
    /// Validate and normalize an update body.
    ///
    /// `name` and id keys are ignored: identity is not mutable via update.
    pub fn from_fields(fields: &RawFields) -> Result<Self, FieldError> {
        let mut patch = Self::default();

        if let Some(value) = supplied_non_empty(fields, "dob") {
            patch.dob = Some(parse_dob(value)?);
        }
        if let Some(value) = supplied_non_empty(fields, "loves") {
            patch.loves = Some(parse_loves(value)?);
        }
        if let Some(value) = supplied(fields, "weight") {
            patch.weight = Some(parse_weight(value)?);
        }
        if let Some(value) = fields.get("vampires") {
            patch.vampires = Some(parse_vampires(value)?);
        }
        if let Some(value) = supplied_non_empty(fields, "gender") {
            patch.gender = Some(parse_gender(value)?);
        }
        if let Some(value) = supplied(fields, "vaccinated") {
            patch.vaccinated = Some(parse_vaccinated(value)?);
        }

        Ok(patch)
    }

    /// True if applying this patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.dob.is_none()
            && self.loves.is_none()
            && self.weight.is_none()
            && self.vampires.is_none()
            && self.gender.is_none()
            && self.vaccinated.is_none()
    }

    /// Write the supplied fields into `unicorn`.
    pub fn apply_to(self, unicorn: &mut Unicorn) {
        if let Some(dob) = self.dob {
            unicorn.dob = dob;
        }
        if let Some(loves) = self.loves {
            unicorn.loves = loves;
        }
        if let Some(weight) = self.weight {
            unicorn.weight = weight;
        }
        if let Some(vampires) = self.vampires {
            unicorn.vampires = vampires;
        }
        if let Some(gender) = self.gender {
            unicorn.gender = gender;
        }
        if let Some(vaccinated) = self.vaccinated {
            unicorn.vaccinated = vaccinated;
        }
    }
}

/// The value for `key`, unless it is absent or `null`.
fn supplied<'a>(fields: &'a RawFields, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| !value.is_null())
}

fn required<'a>(fields: &'a RawFields, key: &'static str) -> Result<&'a Value, FieldError> {
    supplied(fields, key).ok_or_else(|| FieldError::Missing(vec![key]))
}

/// Like `supplied`, but also skips empty strings.
fn supplied_non_empty<'a>(fields: &'a RawFields, key: &str) -> Option<&'a Value> {
    supplied(fields, key).filter(|value| !is_blank_string(value))
}

fn is_supplied_for_create(fields: &RawFields, key: &str) -> bool {
    match key {
        // A weight of "" is present but unparseable, not missing.
        "weight" => supplied(fields, key).is_some(),
        _ => supplied_non_empty(fields, key).is_some(),
    }
}

fn is_blank_string(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

fn parse_name(value: &Value) -> Result<String, FieldError> {
    match value {
        Value::String(s) => Ok(s.trim().to_owned()),
        _ => Err(FieldError::invalid("name", "expected a string")),
    }
}

/// Parse a date of birth and normalize it to `YYYY-MM-DDTHH:MM:SS.sssZ`.
///
/// Accepts RFC 3339 strings, naive date-times and plain dates (both read as
/// UTC), or a number of milliseconds since the Unix epoch.
pub fn parse_dob(value: &Value) -> Result<String, FieldError> {
    let parsed = match value {
        Value::String(s) => parse_date_string(s.trim()),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };
    parsed
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .ok_or_else(|| FieldError::invalid("dob", format!("'{value}' is not a valid date")))
}

fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_loves(value: &Value) -> Result<Vec<String>, FieldError> {
    let loves: Vec<String> = match value {
        Value::String(s) => vec![s.trim().to_owned()],
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|s| s.trim().to_owned())
                    .ok_or_else(|| FieldError::invalid("loves", "every entry must be a string"))
            })
            .collect::<Result<_, _>>()?,
        _ => {
            return Err(FieldError::invalid(
                "loves",
                "expected a string or a list of strings",
            ));
        }
    };

    let loves: Vec<String> = loves.into_iter().filter(|love| !love.is_empty()).collect();
    if loves.is_empty() {
        return Err(FieldError::invalid("loves", "must not be empty"));
    }
    Ok(loves)
}

fn parse_weight(value: &Value) -> Result<f64, FieldError> {
    let weight = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    weight
        .filter(|w| w.is_finite())
        .ok_or_else(|| FieldError::invalid("weight", format!("'{value}' is not a number")))
}

/// Parse an optional vampire count. `null` and `""` mean absent.
fn parse_vampires(value: &Value) -> Result<Option<u64>, FieldError> {
    let invalid = || {
        FieldError::invalid(
            "vampires",
            format!("'{value}' is not a non-negative integer"),
        )
    };
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse::<u64>().map(Some).map_err(|_| invalid()),
        Value::Number(n) => n.as_u64().map(Some).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn parse_gender(value: &Value) -> Result<Gender, FieldError> {
    value
        .as_str()
        .and_then(Gender::parse)
        .ok_or_else(|| FieldError::invalid("gender", "expected one of m, f, male, female"))
}

fn parse_vaccinated(value: &Value) -> Result<bool, FieldError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(FieldError::invalid("vaccinated", "expected true or false")),
    }
}
