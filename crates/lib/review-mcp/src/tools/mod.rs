//! MCP tool modules.
//!
//! Tools are grouped by domain: restaurant and review operations, and
//! contextual help describing them.

pub mod restaurants;
mod context;
