//! Merchant profile endpoints: read, full update, completeness flag

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::Json;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    ProfileFlagResponse, ProfileFlagUpdate, ProfileUpdateRequest, UpdateProfileResponse,
};
use shared::util::{is_gst_number, is_ten_digits, now_millis};

use crate::auth::MerchantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

use super::ApiResult;

/// GET /profile
pub async fn get_profile(
    State(state): State<AppState>,
    identity: MerchantIdentity,
) -> Result<impl IntoResponse, ServiceError> {
    let row = db::merchants::find_by_id(&state.pool, &identity.merchant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound))?;

    // A row without its identity columns cannot be served as a profile
    if row.id.trim().is_empty() || row.superkey.trim().is_empty() || row.mobile.trim().is_empty() {
        tracing::error!(
            merchant_id = %identity.merchant_id,
            "Merchant row is missing identity columns"
        );
        return Err(AppError::new(ErrorCode::ProfileIncomplete).into());
    }

    // Legacy rows carry NULL created_at; stamp them on first read
    let created_at = match row.created_at {
        Some(ts) => ts,
        None => {
            let now = now_millis();
            db::merchants::backfill_created_at(&state.pool, &identity.merchant_id, now).await?;
            now
        }
    };

    Ok((
        [(
            http::header::CACHE_CONTROL,
            "no-store, must-revalidate, private",
        )],
        Json(row.into_profile(created_at)),
    ))
}

/// PUT /profile
pub async fn update_profile(
    State(state): State<AppState>,
    identity: MerchantIdentity,
    body: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> ApiResult<UpdateProfileResponse> {
    let Json(req) = body.map_err(|rej| AppError::invalid_request(rej.body_text()))?;

    // All mandatory gaps are reported together, not one at a time
    let missing = req.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::new(ErrorCode::MissingRequiredFields)
            .with_missing_fields(missing)
            .into());
    }

    let name = req.name.as_deref().unwrap_or_default().trim();
    let store_name = req.store_name.as_deref().unwrap_or_default().trim();
    let store_address = req.store_address.as_deref().unwrap_or_default().trim();
    let store_contact = req.store_contact.as_deref().unwrap_or_default().trim();
    let store_country_code = req.store_country_code.as_deref().unwrap_or_default().trim();

    if !is_ten_digits(store_contact) {
        return Err(AppError::new(ErrorCode::StoreContactInvalid).into());
    }

    let gst_number = req.gst_number_normalized();
    if let Some(gst) = gst_number
        && !is_gst_number(gst)
    {
        return Err(AppError::new(ErrorCode::GstNumberInvalid).into());
    }

    // Pre-check for a clean 409; the UNIQUE constraint still backstops races
    if db::merchants::store_contact_taken(&state.pool, store_contact, &identity.merchant_id).await?
    {
        return Err(AppError::conflict(ErrorCode::StoreContactTaken).into());
    }

    let update = db::merchants::ProfileUpdate {
        name,
        store_name,
        store_address,
        store_contact,
        store_country_code,
        gst_number,
        is_profile_complete: req.computed_complete(),
        photo: req.photo_update(),
    };

    let rows = db::merchants::update_profile(&state.pool, &identity.merchant_id, &update).await?;
    if rows == 0 {
        return Err(AppError::new(ErrorCode::ProfileNotFound).into());
    }

    let row = db::merchants::find_by_id(&state.pool, &identity.merchant_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound))?;
    let created_at = row.created_at.unwrap_or_else(now_millis);

    Ok(Json(UpdateProfileResponse {
        success: true,
        updated_profile: row.into_profile(created_at),
    }))
}

/// PATCH /profile
pub async fn set_profile_flag(
    State(state): State<AppState>,
    identity: MerchantIdentity,
    body: Result<Json<ProfileFlagUpdate>, JsonRejection>,
) -> ApiResult<ProfileFlagResponse> {
    let Json(req) = body.map_err(|rej| AppError::invalid_request(rej.body_text()))?;

    let rows =
        db::merchants::set_profile_complete(&state.pool, &identity.merchant_id, req.is_profile_complete)
            .await?;
    if rows == 0 {
        return Err(AppError::new(ErrorCode::ProfileNotFound).into());
    }

    Ok(Json(ProfileFlagResponse {
        success: true,
        is_profile_complete: req.is_profile_complete,
    }))
}
