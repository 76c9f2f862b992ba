//! Authentication middleware and rate limiting for merchant connections

pub mod merchant_auth;
pub mod rate_limit;

pub use merchant_auth::MerchantIdentity;
