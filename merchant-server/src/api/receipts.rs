//! Receipt endpoints: create, list, detail, numbering, settle

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use serde::Serialize;
use serde_json::{Value, json};
use shared::error::{AppError, ErrorCode};
use shared::receipt::{
    PaymentPhone, RawTotal, ReceiptDraft, ReceiptStatus, ReceiptSummary, validate_receipt,
};
use shared::util::now_millis;
use uuid::Uuid;

use crate::auth::MerchantIdentity;
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

use super::ApiResult;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceiptResponse {
    pub receipt_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItemDetail {
    pub description: String,
    pub quantity: i32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_amount: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDetailResponse {
    pub id: String,
    pub receipt_number: String,
    pub date: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub customer_country_code: String,
    pub payment_type: String,
    pub status: ReceiptStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_phone: Option<PaymentPhone>,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_percentage: Option<f64>,
    pub subtotal: f64,
    pub gst_amount: f64,
    pub total: f64,
    pub due_total: f64,
    pub created_at: i64,
    pub items: Vec<ReceiptItemDetail>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettleResponse {
    pub success: bool,
    pub status: ReceiptStatus,
}

/// POST /receipts
pub async fn create_receipt(
    State(state): State<AppState>,
    identity: MerchantIdentity,
    body: Result<Json<ReceiptDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateReceiptResponse>), ServiceError> {
    let Json(mut draft) = body.map_err(|rej| AppError::invalid_request(rej.body_text()))?;

    // Totals arriving over the wire are untrusted; normalization recomputes
    // them server-side before validation and persistence
    draft.normalize_for_submit();

    let report = validate_receipt(&draft);
    if !report.is_empty() {
        return Err(report.into_error().into());
    }

    let receipt_id = Uuid::new_v4().to_string();
    let now = now_millis();
    let status = ReceiptStatus::from(draft.payment_status).as_str();

    // A duplicate receipt number for this merchant surfaces as a 409
    db::receipts::insert(
        &state.pool,
        &receipt_id,
        &identity.merchant_id,
        &draft,
        status,
        now,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReceiptResponse { receipt_id }),
    ))
}

/// GET /viewreceipts
pub async fn list_receipts(
    State(state): State<AppState>,
    identity: MerchantIdentity,
) -> ApiResult<Vec<ReceiptSummary>> {
    let rows = db::receipts::list_for_merchant(&state.pool, &identity.merchant_id).await?;

    let mut summaries = Vec::with_capacity(rows.len());
    for row in rows {
        let status = parse_stored_status(&row.status, &row.id)?;
        summaries.push(ReceiptSummary {
            id: row.id,
            receipt_number: row.receipt_number,
            customer_name: row.customer_name,
            date: row.date,
            status,
            total: RawTotal::Number(row.total),
        });
    }

    Ok(Json(summaries))
}

/// GET /receipts/next-number
///
/// Sequential display numbers per merchant. Collisions under concurrency are
/// handled at create time by the uniqueness constraint, not here.
pub async fn next_receipt_number(
    State(state): State<AppState>,
    identity: MerchantIdentity,
) -> ApiResult<Value> {
    let count = db::receipts::count_for_merchant(&state.pool, &identity.merchant_id).await?;
    Ok(Json(json!({ "receiptNumber": format!("RCP-{:04}", count + 1) })))
}

/// GET /receipts/{id}
pub async fn get_receipt(
    State(state): State<AppState>,
    identity: MerchantIdentity,
    Path(id): Path<String>,
) -> ApiResult<ReceiptDetailResponse> {
    let row = db::receipts::find_by_id(&state.pool, &identity.merchant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReceiptNotFound))?;

    let items = db::receipts::items_for_receipt(&state.pool, &row.id).await?;
    let status = parse_stored_status(&row.status, &row.id)?;

    let payment_phone = row.payment_phone.map(|phone| PaymentPhone {
        phone,
        country_code: row.payment_phone_country_code.unwrap_or_default(),
    });

    Ok(Json(ReceiptDetailResponse {
        id: row.id,
        receipt_number: row.receipt_number,
        date: row.date,
        customer_name: row.customer_name,
        customer_contact: row.customer_contact,
        customer_country_code: row.customer_country_code,
        payment_type: row.payment_type,
        status,
        payment_date: row.payment_date,
        payment_phone,
        notes: row.notes,
        gst_percentage: row.gst_percentage,
        subtotal: row.subtotal,
        gst_amount: row.gst_amount,
        total: row.total,
        due_total: row.due_total,
        created_at: row.created_at,
        items: items
            .into_iter()
            .map(|item| ReceiptItemDetail {
                description: item.description,
                quantity: item.quantity,
                price: item.price,
                advance_amount: item.advance_amount,
                due_amount: item.due_amount,
            })
            .collect(),
    }))
}

/// PATCH /receipts/{id}/settle
pub async fn settle_receipt(
    State(state): State<AppState>,
    identity: MerchantIdentity,
    Path(id): Path<String>,
) -> ApiResult<SettleResponse> {
    let status = db::receipts::get_status(&state.pool, &identity.merchant_id, &id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReceiptNotFound))?;

    match ReceiptStatus::parse(&status) {
        Some(ReceiptStatus::Due) => {}
        Some(ReceiptStatus::DuePaid) => {
            return Err(AppError::conflict(ErrorCode::ReceiptAlreadySettled).into());
        }
        Some(_) => return Err(AppError::new(ErrorCode::ReceiptNotDue).into()),
        None => {
            return Err(ServiceError::Db(
                format!("corrupt receipt status '{status}' on {id}").into(),
            ));
        }
    }

    // A concurrent settle may have flipped the row between read and write
    let rows = db::receipts::mark_due_paid(&state.pool, &identity.merchant_id, &id).await?;
    if rows == 0 {
        return Err(AppError::conflict(ErrorCode::ReceiptAlreadySettled).into());
    }

    Ok(Json(SettleResponse {
        success: true,
        status: ReceiptStatus::DuePaid,
    }))
}

fn parse_stored_status(raw: &str, receipt_id: &str) -> Result<ReceiptStatus, ServiceError> {
    ReceiptStatus::parse(raw).ok_or_else(|| {
        ServiceError::Db(format!("corrupt receipt status '{raw}' on {receipt_id}").into())
    })
}
