use shared::models::{PhotoUpdate, Profile};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
pub struct MerchantRow {
    pub id: String,
    pub superkey: String,
    pub mobile: String,
    pub hashed_password: String,
    pub name: String,
    pub store_name: String,
    pub store_address: String,
    pub store_contact: Option<String>,
    pub store_country_code: String,
    pub gst_number: Option<String>,
    pub profile_photo: Option<String>,
    pub is_profile_complete: bool,
    pub created_at: Option<i64>,
}

impl MerchantRow {
    /// Wire profile with `created_at` already resolved (legacy rows carry NULL)
    pub fn into_profile(self, created_at: i64) -> Profile {
        Profile {
            id: self.id,
            superkey: self.superkey,
            mobile: self.mobile,
            name: self.name,
            store_name: self.store_name,
            store_address: self.store_address,
            store_contact: self.store_contact,
            store_country_code: self.store_country_code,
            gst_number: self.gst_number,
            profile_photo: self.profile_photo,
            is_profile_complete: self.is_profile_complete,
            created_at,
        }
    }
}

/// Full profile update with fixed mandatory columns.
///
/// The nullable photo column is carried as an explicit variant rather than a
/// dynamically assembled column list: `Keep` leaves the stored value alone,
/// `Clear` nulls it, `Set` replaces it.
pub struct ProfileUpdate<'a> {
    pub name: &'a str,
    pub store_name: &'a str,
    pub store_address: &'a str,
    pub store_contact: &'a str,
    pub store_country_code: &'a str,
    pub gst_number: Option<&'a str>,
    pub is_profile_complete: bool,
    pub photo: PhotoUpdate,
}

pub async fn create(
    pool: &PgPool,
    id: &str,
    superkey: &str,
    mobile: &str,
    hashed_password: &str,
    name: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO merchants (id, superkey, mobile, hashed_password, name, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id)
    .bind(superkey)
    .bind(mobile)
    .bind(hashed_password)
    .bind(name)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<MerchantRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM merchants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_mobile(
    pool: &PgPool,
    mobile: &str,
) -> Result<Option<MerchantRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM merchants WHERE mobile = $1")
        .bind(mobile)
        .fetch_optional(pool)
        .await
}

/// Is the contact already held by a different merchant? Best-effort UX
/// pre-check; the UNIQUE constraint on the write is the real guarantee.
pub async fn store_contact_taken(
    pool: &PgPool,
    store_contact: &str,
    own_id: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM merchants WHERE store_contact = $1 AND id <> $2)")
        .bind(store_contact)
        .bind(own_id)
        .fetch_one(pool)
        .await
}

/// Apply a full profile update; returns the number of rows affected
pub async fn update_profile(
    pool: &PgPool,
    merchant_id: &str,
    update: &ProfileUpdate<'_>,
) -> Result<u64, sqlx::Error> {
    let (apply_photo, photo_value) = match &update.photo {
        PhotoUpdate::Keep => (false, None),
        PhotoUpdate::Clear => (true, None),
        PhotoUpdate::Set(path) => (true, Some(path.as_str())),
    };

    let result = sqlx::query(
        "UPDATE merchants SET
             name = $1,
             store_name = $2,
             store_address = $3,
             store_contact = $4,
             store_country_code = $5,
             gst_number = $6,
             is_profile_complete = $7,
             profile_photo = CASE WHEN $8 THEN $9 ELSE profile_photo END
         WHERE id = $10",
    )
    .bind(update.name)
    .bind(update.store_name)
    .bind(update.store_address)
    .bind(update.store_contact)
    .bind(update.store_country_code)
    .bind(update.gst_number)
    .bind(update.is_profile_complete)
    .bind(apply_photo)
    .bind(photo_value)
    .bind(merchant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Overwrite the completeness flag directly; returns the number of rows affected
pub async fn set_profile_complete(
    pool: &PgPool,
    merchant_id: &str,
    is_complete: bool,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE merchants SET is_profile_complete = $1 WHERE id = $2")
        .bind(is_complete)
        .bind(merchant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Stamp a missing created_at on first read of a legacy row
pub async fn backfill_created_at(
    pool: &PgPool,
    merchant_id: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE merchants SET created_at = $1 WHERE id = $2 AND created_at IS NULL")
        .bind(now)
        .bind(merchant_id)
        .execute(pool)
        .await?;
    Ok(())
}
