//! Identity type for unicorn records.
//!
//! Ids are opaque strings on the wire. Internally they come from a
//! monotonically increasing counter seeded from wall-clock milliseconds, so
//! they read like timestamps but are never handed out twice by one store.

use std::fmt;

use serde::Serialize;

/// Opaque identity of a unicorn record.
///
/// # Invariants
///
/// - Assigned once by the store at creation time.
/// - Never reassigned or reused within a store's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
#[allow(clippy::disallowed_methods)] // Clone needed to hand records out of the store
pub struct UnicornId(String);

impl UnicornId {
    /// Create an id from an existing string.
    #[cfg(test)]
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnicornId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out fresh `UnicornId`s.
///
/// Each call to `next_id` returns the current counter value and advances it
/// by one, so ids from a single generator are strictly increasing.
#[derive(Debug)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Create a generator whose first id is `seed`.
    #[must_use]
    pub const fn starting_at(seed: u64) -> Self {
        Self { next: seed }
    }

    /// Create a generator seeded from the current Unix time in milliseconds.
    #[must_use]
    pub fn from_clock() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self::starting_at(u64::try_from(millis).unwrap_or_default())
    }

    /// Return the next unused id.
    pub fn next_id(&mut self) -> UnicornId {
        let id = UnicornId(self.next.to_string());
        self.next = self.next.wrapping_add(1);
        id
    }
}
