//! Unified service-layer error type for merchant-server
//!
//! `ServiceError` bridges the gap between DB-layer errors (`sqlx::Error`) and
//! the API-layer error (`AppError`). It enables `?` propagation without manual
//! `.map_err(|e| { tracing::error!(...); AppError::new(...) })` boilerplate.
//!
//! Unique-constraint violations are resolved here, by constraint name, into
//! the matching business conflict before anything is classified as a database
//! fault.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error for request handlers.
///
/// - `Db`: Database/infrastructure errors (auto-logged, mapped to DatabaseError)
/// - `App`: Business-rule errors (transparent pass-through to client)
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Database or infrastructure error (sqlx, migration, serde, etc.)
    #[error("database error: {0}")]
    Db(BoxError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    #[error(transparent)]
    App(#[from] AppError),
}

/// Unique constraints that surface as business conflicts rather than
/// database faults. Names follow the Postgres default for column and
/// table-level UNIQUE declarations.
fn conflict_for_constraint(constraint: &str) -> Option<AppError> {
    match constraint {
        "merchants_store_contact_key" => Some(AppError::new(ErrorCode::StoreContactTaken)),
        "merchants_mobile_key" => Some(AppError::new(ErrorCode::MobileNumberTaken)),
        "receipts_merchant_id_receipt_number_key" => {
            Some(AppError::new(ErrorCode::ReceiptNumberTaken))
        }
        _ => None,
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
            && let Some(conflict) = db_err.constraint().and_then(conflict_for_constraint)
        {
            return ServiceError::App(conflict);
        }
        ServiceError::Db(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
