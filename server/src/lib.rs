// Life of a request:
// 1. axum extracts the path name, query criteria or JSON body
// 2. The handler calls into `UnicornService`
// 3. For searches:
//     - Parse raw query strings into typed criteria
//     - Filter the collection under a read lock
//    For mutations:
//     - Coerce the body into validated fields
//     - Apply it to the store under the write lock
// 4. The result or error is serialized as JSON
//
// System components:
//  - Record store (in-memory, insertion ordered)
//  - Criteria parser + query engine
//  - HTTP routes

pub mod config;
pub mod query;
pub mod routes;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod simulation;

pub use service::{ApiError, UnicornService};
pub use store::UnicornStore;
