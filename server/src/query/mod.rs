//! Query engine for the unicorn collection.
//!
//! This module turns query-string criteria into record subsets:
//! - `criteria` parses raw string parameters into typed `Criterion` values
//! - `engine` applies a `Criteria` conjunction to a record slice
//!
//! # Example
//!
//! ```
//! use unicorns::query::{Criteria, RawCriteria, filter};
//! use unicorns::store::{UnicornStore, builtin_seed};
//!
//! let store = UnicornStore::with_records(builtin_seed().unwrap()).unwrap();
//! let mut raw = RawCriteria::new();
//! raw.insert("loves".to_owned(), "apple,watermelon".to_owned());
//!
//! let found = filter(store.all(), &Criteria::parse(&raw));
//! assert_eq!(found.len(), 2);
//! ```

pub mod criteria;
pub mod engine;

pub use criteria::{CRITERION_KEYS, Criteria, Criterion, Parsed, RawCriteria};
pub use engine::filter;
