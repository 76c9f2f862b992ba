//! Data models
//!
//! Shared between the server and its API clients. Wire field names are
//! camelCase; the storage schema maps them to snake_case columns.

pub mod profile;

// Re-exports
pub use profile::*;
