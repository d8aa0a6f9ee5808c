//! Business layer of the films library.
//! - Validation, change-merge and link reconciliation are pure functions.
//! - Services orchestrate them over repository traits; sea-orm backs the
//!   traits in production and in-memory mocks back them in tests.

pub mod errors;
pub mod domain;
pub mod validation;
pub mod merge;
pub mod reconcile;
pub mod actors;
pub mod films;
pub mod users;
mod sql;
#[cfg(test)]
pub mod test_support;
