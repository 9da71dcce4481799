//! Deterministic simulation testing.
//!
//! Runs long seeded sequences of store operations and searches, checking
//! invariants after every step:
//! - search output is an order-preserving subsequence of the collection
//! - a record is kept exactly when it satisfies every criterion
//! - malformed criteria keep nothing
//! - names stay unique and ids are never reused
//!
//! Given the same seed, a run is identical.

#![cfg(test)]
