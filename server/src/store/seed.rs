//! Starting data for a fresh store.
//!
//! The server starts either from the built-in herd below or from a JSON file
//! holding an array of record bodies. Both go through the same coercion as a
//! create request, so seed data obeys every record invariant.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use super::fields::{FieldError, NewUnicorn};

/// Errors that can occur while loading seed data.
#[derive(Debug)]
pub enum SeedError {
    /// The seed file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The seed file is not valid JSON.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The seed data is not an array of objects.
    NotAnArray,
    /// A record in the seed data failed validation.
    Record { index: usize, error: FieldError },
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file {}: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "seed file {} is not valid JSON: {source}", path.display())
            }
            Self::NotAnArray => write!(f, "seed data must be a JSON array of objects"),
            Self::Record { index, error } => write!(f, "seed record {index}: {error}"),
        }
    }
}

impl std::error::Error for SeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::NotAnArray => None,
            Self::Record { error, .. } => Some(error),
        }
    }
}

/// The built-in herd.
pub fn builtin_seed() -> Result<Vec<NewUnicorn>, SeedError> {
    parse_seed(&json!([
        { "name": "Horny", "dob": "1992-03-13T07:47:00Z", "loves": ["carrot", "papaya"], "weight": 600, "gender": "m", "vampires": 63 },
        { "name": "Aurora", "dob": "1991-01-24T13:00:00Z", "loves": ["carrot", "grape"], "weight": 450, "gender": "f", "vampires": 43 },
        { "name": "Unicrom", "dob": "1973-02-09T22:10:00Z", "loves": ["energon", "redbull"], "weight": 984, "gender": "m", "vampires": 182, "vaccinated": false },
        { "name": "Roooooodles", "dob": "1979-08-18T18:44:00Z", "loves": ["apple"], "weight": 575, "gender": "m", "vampires": 99 },
        { "name": "Solnara", "dob": "1985-07-04T02:01:00Z", "loves": ["apple", "carrot", "chocolate"], "weight": 550, "gender": "f", "vampires": 80 },
        { "name": "Ayna", "dob": "1998-03-07T08:30:00Z", "loves": ["strawberry", "lemon"], "weight": 733, "gender": "f", "vampires": 40 },
        { "name": "Kenny", "dob": "1997-07-01T10:42:00Z", "loves": ["grape", "lemon"], "weight": 690, "gender": "m", "vampires": 39 },
        { "name": "Raleigh", "dob": "2005-05-03T00:57:00Z", "loves": ["apple", "sugar"], "weight": 421, "gender": "m", "vampires": 2 },
        { "name": "Leia", "dob": "2001-10-08T14:53:00Z", "loves": ["apple", "watermelon"], "weight": 601, "gender": "f", "vampires": 33 },
        { "name": "Pilot", "dob": "1997-03-01T05:03:00Z", "loves": ["apple", "watermelon"], "weight": 650, "gender": "m", "vampires": 54 },
        { "name": "Nimue", "dob": "1999-12-20T16:15:00Z", "loves": ["grape", "carrot"], "weight": 540, "gender": "f", "vaccinated": false },
        { "name": "Dunx", "dob": "1976-07-18T18:18:00Z", "loves": ["grape", "watermelon"], "weight": 704, "gender": "m", "vampires": 165 }
    ]))
}

/// Load seed records from a JSON file.
pub fn load_seed_file(path: &Path) -> Result<Vec<NewUnicorn>, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&contents).map_err(|source| SeedError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    parse_seed(&value)
}

fn parse_seed(value: &Value) -> Result<Vec<NewUnicorn>, SeedError> {
    let items = value.as_array().ok_or(SeedError::NotAnArray)?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let fields = item.as_object().ok_or(SeedError::NotAnArray)?;
            NewUnicorn::from_fields(fields).map_err(|error| SeedError::Record { index, error })
        })
        .collect()
}
