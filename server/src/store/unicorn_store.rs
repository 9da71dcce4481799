//! The in-memory unicorn collection.
//!
//! `UnicornStore` is the sole owner and mutator of the records. It keeps
//! them in insertion order and looks them up by case-insensitive name.
//!
//! # Invariants
//!
//! - At most one record per case-insensitive name.
//! - Ids are assigned once, on insert, and never reused.
//! - Deleting a record never reorders the survivors.
//! - Every mutating method either succeeds completely or leaves the
//!   collection untouched.

use super::StoreError;
use super::fields::{NewUnicorn, RawFields, UnicornPatch};
use crate::types::{IdGenerator, Unicorn};

/// Ordered, in-memory collection of unicorn records.
#[derive(Debug)]
pub struct UnicornStore {
    records: Vec<Unicorn>,
    ids: IdGenerator,
}

impl Default for UnicornStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UnicornStore {
    /// Create an empty store with ids seeded from the clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_generator(IdGenerator::from_clock())
    }

    /// Create an empty store with a caller-supplied id generator.
    #[must_use]
    pub const fn with_id_generator(ids: IdGenerator) -> Self {
        Self {
            records: Vec::new(),
            ids,
        }
    }

    /// Create a store pre-populated with `records`, in order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if two records share a name.
    pub fn with_records(
        records: impl IntoIterator<Item = NewUnicorn>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Number of live records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the store holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of every record, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Unicorn] {
        &self.records
    }

    /// Find a record by case-insensitive exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Unicorn> {
        self.position(name).map(|index| &self.records[index])
    }

    /// Validate a raw create body and insert the record.
    ///
    /// # Errors
    ///
    /// - `StoreError::Validation` if a required field is missing or a value
    ///   cannot be coerced.
    /// - `StoreError::Conflict` if the name is already taken.
    pub fn create(&mut self, fields: &RawFields) -> Result<Unicorn, StoreError> {
        let new_unicorn = NewUnicorn::from_fields(fields)?;
        self.insert(new_unicorn)
    }

    /// Insert an already validated record, assigning it a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the name is already taken.
    pub fn insert(&mut self, new_unicorn: NewUnicorn) -> Result<Unicorn, StoreError> {
        if self.position(&new_unicorn.name).is_some() {
            return Err(StoreError::Conflict {
                name: new_unicorn.name,
            });
        }

        let unicorn = Unicorn {
            id: self.ids.next_id(),
            name: new_unicorn.name,
            dob: new_unicorn.dob,
            loves: new_unicorn.loves,
            weight: new_unicorn.weight,
            vampires: new_unicorn.vampires,
            gender: new_unicorn.gender,
            vaccinated: new_unicorn.vaccinated,
        };
        tracing::info!("Created unicorn '{}' with id {}", unicorn.name, unicorn.id);
        self.records.push(unicorn.clone());
        Ok(unicorn)
    }

    /// Apply the supplied fields of a raw update body to the named record.
    ///
    /// The body is fully coerced before the record is touched, so a bad
    /// value leaves the record exactly as it was.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if no record has this name.
    /// - `StoreError::Validation` if a supplied value cannot be coerced.
    pub fn update(&mut self, name: &str, fields: &RawFields) -> Result<Unicorn, StoreError> {
        let index = self.position(name).ok_or_else(|| StoreError::NotFound {
            name: name.to_owned(),
        })?;
        let patch = UnicornPatch::from_fields(fields)?;
        Ok(self.apply_patch(index, patch))
    }

    fn apply_patch(&mut self, index: usize, patch: UnicornPatch) -> Unicorn {
        let unicorn = &mut self.records[index];
        if patch.is_empty() {
            tracing::debug!("Update for '{}' carried no known fields", unicorn.name);
        } else {
            patch.apply_to(unicorn);
            tracing::info!("Updated unicorn '{}'", unicorn.name);
        }
        unicorn.clone()
    }

    /// Remove the named record and return it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record has this name.
    pub fn delete(&mut self, name: &str) -> Result<Unicorn, StoreError> {
        let index = self.position(name).ok_or_else(|| StoreError::NotFound {
            name: name.to_owned(),
        })?;
        // `remove` shifts the tail left, keeping survivors in order.
        let unicorn = self.records.remove(index);
        tracing::info!("Deleted unicorn '{}'", unicorn.name);
        Ok(unicorn)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|unicorn| unicorn.has_name(name))
    }
}
