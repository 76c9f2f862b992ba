//! Shared types for the merchant receipt platform
//!
//! Common types used by the server and client crates: the error system,
//! profile models, and the receipt computation/validation engine.

pub mod error;
pub mod models;
pub mod receipt;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
