//! Storage models and schema helpers for reviews-mcp.
//!
//! This crate defines the canonical data model shared by the control plane,
//! the storage backend, and the MCP tool surface, along with the pure stats
//! math applied to review aggregates.

pub mod models;
pub mod schema;
pub mod stats;

pub use models::*;
