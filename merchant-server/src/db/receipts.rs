use shared::receipt::ReceiptDraft;
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
pub struct ReceiptRow {
    pub id: String,
    pub receipt_number: String,
    pub date: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub customer_country_code: String,
    pub payment_type: String,
    pub payment_date: Option<String>,
    pub payment_phone: Option<String>,
    pub payment_phone_country_code: Option<String>,
    pub notes: String,
    pub status: String,
    pub gst_percentage: Option<f64>,
    pub subtotal: f64,
    pub gst_amount: f64,
    pub total: f64,
    pub due_total: f64,
    pub created_at: i64,
}

#[derive(sqlx::FromRow)]
pub struct ReceiptItemRow {
    pub description: String,
    pub quantity: i32,
    pub price: f64,
    pub advance_amount: Option<f64>,
    pub due_amount: Option<f64>,
}

/// Columns needed by the list view
#[derive(sqlx::FromRow)]
pub struct ReceiptSummaryRow {
    pub id: String,
    pub receipt_number: String,
    pub customer_name: String,
    pub date: String,
    pub status: String,
    pub total: f64,
}

/// Insert a validated receipt and its line items in one transaction
pub async fn insert(
    pool: &PgPool,
    receipt_id: &str,
    merchant_id: &str,
    draft: &ReceiptDraft,
    status: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (payment_phone, payment_phone_country_code) = match &draft.payment_phone {
        Some(p) => (Some(p.phone.as_str()), Some(p.country_code.as_str())),
        None => (None, None),
    };

    sqlx::query(
        "INSERT INTO receipts (
             id, merchant_id, receipt_number, date,
             customer_name, customer_contact, customer_country_code,
             payment_type, payment_date, payment_phone, payment_phone_country_code,
             notes, status, gst_percentage,
             subtotal, gst_amount, total, due_total, created_at
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)",
    )
    .bind(receipt_id)
    .bind(merchant_id)
    .bind(&draft.receipt_number)
    .bind(&draft.date)
    .bind(&draft.customer_name)
    .bind(&draft.customer_contact)
    .bind(&draft.customer_country_code)
    .bind(draft.payment_type.as_str())
    .bind(draft.payment_date.as_deref())
    .bind(payment_phone)
    .bind(payment_phone_country_code)
    .bind(&draft.notes)
    .bind(status)
    .bind(draft.gst_percentage)
    .bind(draft.subtotal)
    .bind(draft.gst_amount)
    .bind(draft.total)
    .bind(draft.due_total)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for (position, item) in draft.items.iter().enumerate() {
        sqlx::query(
            "INSERT INTO receipt_items (
                 receipt_id, position, description, quantity, price, advance_amount, due_amount
             ) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(receipt_id)
        .bind(position as i32)
        .bind(&item.description)
        // The validator has already required a whole number here
        .bind(item.quantity as i32)
        .bind(item.price)
        .bind(item.advance_amount)
        .bind(item.due_amount)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

/// All receipt summaries for a merchant, newest first
pub async fn list_for_merchant(
    pool: &PgPool,
    merchant_id: &str,
) -> Result<Vec<ReceiptSummaryRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, receipt_number, customer_name, date, status, total
         FROM receipts WHERE merchant_id = $1
         ORDER BY created_at DESC",
    )
    .bind(merchant_id)
    .fetch_all(pool)
    .await
}

pub async fn count_for_merchant(pool: &PgPool, merchant_id: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM receipts WHERE merchant_id = $1")
        .bind(merchant_id)
        .fetch_one(pool)
        .await
}

pub async fn find_by_id(
    pool: &PgPool,
    merchant_id: &str,
    receipt_id: &str,
) -> Result<Option<ReceiptRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM receipts WHERE id = $1 AND merchant_id = $2")
        .bind(receipt_id)
        .bind(merchant_id)
        .fetch_optional(pool)
        .await
}

pub async fn items_for_receipt(
    pool: &PgPool,
    receipt_id: &str,
) -> Result<Vec<ReceiptItemRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT description, quantity, price, advance_amount, due_amount
         FROM receipt_items WHERE receipt_id = $1
         ORDER BY position",
    )
    .bind(receipt_id)
    .fetch_all(pool)
    .await
}

pub async fn get_status(
    pool: &PgPool,
    merchant_id: &str,
    receipt_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT status FROM receipts WHERE id = $1 AND merchant_id = $2")
        .bind(receipt_id)
        .bind(merchant_id)
        .fetch_optional(pool)
        .await
}

/// Flip a due receipt to due_paid; the status guard makes concurrent settles
/// first-writer-wins. Returns the number of rows affected.
pub async fn mark_due_paid(
    pool: &PgPool,
    merchant_id: &str,
    receipt_id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE receipts SET status = 'due_paid'
         WHERE id = $1 AND merchant_id = $2 AND status = 'due'",
    )
    .bind(receipt_id)
    .bind(merchant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
