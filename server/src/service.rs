//! Shared access to the unicorn store.
//!
//! `UnicornService` is the boundary the HTTP handlers talk to. It owns one
//! `UnicornStore` behind an `RwLock`, so lookups and searches can run side by
//! side while create, update and delete are serialized. Each mutation holds
//! the write lock across its whole check-then-mutate step, so two creates
//! with the same name cannot both succeed and a concurrent read sees a
//! record either fully present or fully gone.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::query::{Criteria, RawCriteria, filter};
use crate::store::{RawFields, StoreError, UnicornStore};
use crate::types::Unicorn;

/// Errors surfaced to the HTTP layer.
#[derive(Debug)]
pub enum ApiError {
    /// A store operation was rejected.
    Store(StoreError),
    /// The request body was not a JSON object.
    InvalidBody(String),
    /// A path segment could not be decoded.
    InvalidPath(String),
    /// The store lock was poisoned by a panicking writer.
    LockPoisoned,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "{e}"),
            Self::InvalidBody(message) => write!(f, "invalid request body: {message}"),
            Self::InvalidPath(message) => write!(f, "invalid request path: {message}"),
            Self::LockPoisoned => write!(f, "store lock poisoned"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::InvalidBody(_) | Self::InvalidPath(_) | Self::LockPoisoned => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

/// Cloneable handle to the shared store.
#[derive(Debug, Clone)]
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected for shared state
pub struct UnicornService {
    store: Arc<RwLock<UnicornStore>>,
}

impl UnicornService {
    /// Wrap a store for shared use.
    #[must_use]
    pub fn new(store: UnicornStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, UnicornStore>, ApiError> {
        self.store.read().map_err(|_| ApiError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, UnicornStore>, ApiError> {
        self.store.write().map_err(|_| ApiError::LockPoisoned)
    }

    /// Records matching the raw query criteria, in collection order.
    pub fn search(&self, raw: &RawCriteria) -> Result<Vec<Unicorn>, ApiError> {
        let criteria = Criteria::parse(raw);
        let store = self.read()?;
        Ok(filter(store.all(), &criteria).into_iter().cloned().collect())
    }

    /// A single record by case-insensitive name.
    pub fn get(&self, name: &str) -> Result<Unicorn, ApiError> {
        let store = self.read()?;
        store.find_by_name(name).cloned().ok_or_else(|| {
            tracing::debug!("Lookup for '{name}' found nothing");
            ApiError::Store(StoreError::NotFound {
                name: name.to_owned(),
            })
        })
    }

    /// Create a record from a raw body.
    pub fn create(&self, fields: &RawFields) -> Result<Unicorn, ApiError> {
        Ok(self.write()?.create(fields)?)
    }

    /// Update the named record from a raw body.
    pub fn update(&self, name: &str, fields: &RawFields) -> Result<Unicorn, ApiError> {
        Ok(self.write()?.update(name, fields)?)
    }

    /// Delete the named record and return it.
    pub fn delete(&self, name: &str) -> Result<Unicorn, ApiError> {
        Ok(self.write()?.delete(name)?)
    }

    /// Number of records currently stored.
    #[cfg(test)]
    pub fn record_count(&self) -> Result<usize, ApiError> {
        Ok(self.read()?.len())
    }
}
