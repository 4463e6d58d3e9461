//! Store interfaces and `SurrealDB` implementation.
//!
//! The store layer handles persistence of restaurants, reviews, and the
//! per-table id counters.

pub mod surreal;

pub use surreal::{StoreError, StoreResult, SurrealReviewStore};
