//! Database access layer

pub mod merchants;
pub mod receipts;
