//! Record store for unicorns.
//!
//! - `fields` coerces raw JSON bodies into validated inserts and patches.
//! - `unicorn_store` owns the ordered collection and its mutations.
//! - `seed` provides the collection a fresh server starts with.

pub mod fields;
pub mod seed;
mod unicorn_store;

use std::fmt;

pub use fields::{FieldError, NewUnicorn, RawFields, UnicornPatch};
pub use seed::{SeedError, builtin_seed, load_seed_file};
pub use unicorn_store::UnicornStore;

/// Errors returned by store operations.
///
/// Every variant means the collection was left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The body was missing a required field or had an unparseable value.
    Validation(FieldError),
    /// A record with this name (case-insensitive) already exists.
    Conflict { name: String },
    /// No record has this name.
    NotFound { name: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::Conflict { name } => write!(f, "unicorn '{name}' already exists"),
            Self::NotFound { name } => write!(f, "unicorn '{name}' not found"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Conflict { .. } | Self::NotFound { .. } => None,
        }
    }
}

impl From<FieldError> for StoreError {
    fn from(e: FieldError) -> Self {
        Self::Validation(e)
    }
}
