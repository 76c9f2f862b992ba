//! Authentication endpoints: register, login

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::util::{is_ten_digits, now_millis};
use uuid::Uuid;

use crate::auth::merchant_auth;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::ApiResult;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub mobile: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub mobile: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub merchant_id: String,
    pub superkey: String,
}

/// Superkeys identify a merchant account across reinstalls. Shown once
/// at registration, so keep them short enough to write down.
fn generate_superkey() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("SK-{}", raw[..12].to_uppercase())
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ServiceError> {
    let Json(req) = body.map_err(|rej| AppError::invalid_request(rej.body_text()))?;

    let mobile = req.mobile.trim().to_string();
    if !is_ten_digits(&mobile) {
        return Err(AppError::with_message(
            ErrorCode::ValidationFailed,
            "Mobile number must be exactly 10 digits",
        )
        .into());
    }
    if req.password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort).into());
    }

    let hashed = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let id = Uuid::new_v4().to_string();
    let superkey = generate_superkey();
    let name = req.name.as_deref().unwrap_or("").trim();
    let now = now_millis();

    // A duplicate mobile surfaces as MobileNumberTaken (409)
    db::merchants::create(&state.pool, &id, &superkey, &mobile, &hashed, name, now).await?;

    let token = merchant_auth::create_token(&id, &superkey, &state.jwt_secret).map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            merchant_id: id,
            superkey,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthResponse> {
    let Json(req) = body.map_err(|rej| AppError::invalid_request(rej.body_text()))?;

    let mobile = req.mobile.trim();
    let merchant = db::merchants::find_by_mobile(&state.pool, mobile)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &merchant.hashed_password) {
        return Err(AppError::invalid_credentials().into());
    }

    let token =
        merchant_auth::create_token(&merchant.id, &merchant.superkey, &state.jwt_secret).map_err(
            |e| {
                tracing::error!("JWT creation failed: {e}");
                AppError::new(ErrorCode::InternalError)
            },
        )?;

    Ok(Json(AuthResponse {
        token,
        merchant_id: merchant.id,
        superkey: merchant.superkey,
    }))
}
