//! API routes for merchant-server

pub mod auth;
pub mod health;
pub mod profile;
pub mod receipts;

use axum::routing::{get, patch, post};
use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::merchant_auth::merchant_auth_middleware;
use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Account creation, per-IP rate limited
    let register = Router::new()
        .route("/auth/register", post(auth::register))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            register_rate_limit,
        ));

    let login = Router::new()
        .route("/auth/login", post(auth::login))
        .layer(middleware::from_fn_with_state(state.clone(), login_rate_limit));

    // Profile and receipts (JWT authenticated)
    let protected = Router::new()
        .route(
            "/profile",
            get(profile::get_profile)
                .put(profile::update_profile)
                .patch(profile::set_profile_flag),
        )
        .route("/receipts", post(receipts::create_receipt))
        .route("/viewreceipts", get(receipts::list_receipts))
        .route("/receipts/next-number", get(receipts::next_receipt_number))
        .route("/receipts/{id}", get(receipts::get_receipt))
        .route("/receipts/{id}/settle", patch(receipts::settle_receipt))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            merchant_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(register)
        .merge(login)
        .merge(protected)
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
