//! Core types and services for reviews-mcp.
//!
//! This crate owns the `SurrealDB` backing store for restaurants and reviews,
//! the control plane that computes review aggregates and performs creates, and
//! the process-wide service handle shared by every transport.

pub mod control;
pub mod services;
pub mod store;
