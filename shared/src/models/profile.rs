//! Merchant profile model

use serde::{Deserialize, Deserializer, Serialize};

/// Mandatory PUT fields in reporting order
pub const MANDATORY_PROFILE_FIELDS: [&str; 5] = [
    "name",
    "storeName",
    "storeAddress",
    "storeContact",
    "storeCountryCode",
];

/// Merchant profile entity (one row per merchant)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Immutable primary id
    pub id: String,
    /// Immutable public handle, distinct from the primary id
    pub superkey: String,
    /// Account mobile number (login identity)
    pub mobile: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub store_address: String,
    /// 10-digit store contact, unique across merchants once set
    pub store_contact: Option<String>,
    #[serde(default)]
    pub store_country_code: String,
    /// 15-character GST registration number
    pub gst_number: Option<String>,
    pub profile_photo: Option<String>,
    pub is_profile_complete: bool,
    /// Milliseconds since epoch; backfilled with the current time on read
    pub created_at: i64,
}

/// Full profile update payload (PUT)
///
/// Mandatory fields deserialize as `Option` so that every missing field can
/// be collected and reported together instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub store_address: Option<String>,
    #[serde(default)]
    pub store_contact: Option<String>,
    #[serde(default)]
    pub store_country_code: Option<String>,
    /// Optional; empty string is treated as absent
    #[serde(default)]
    pub gst_number: Option<String>,
    /// Tri-state: key absent keeps the stored photo, explicit null or ""
    /// clears it, a value replaces it
    #[serde(default, deserialize_with = "double_option")]
    pub profile_photo: Option<Option<String>>,
}

/// Distinguishes "key absent" from "key present with null" so that omitting
/// `profilePhoto` does not clear a stored photo.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Photo change derived from payload key presence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoUpdate {
    /// Key absent: keep the stored photo
    Keep,
    /// Explicit null or empty string: clear to null
    Clear,
    /// Replace with the given reference
    Set(String),
}

impl ProfileUpdateRequest {
    /// Names of mandatory fields that are absent or blank, in reporting order
    pub fn missing_fields(&self) -> Vec<String> {
        let values = [
            &self.name,
            &self.store_name,
            &self.store_address,
            &self.store_contact,
            &self.store_country_code,
        ];
        MANDATORY_PROFILE_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.as_deref().is_none_or(|s| s.trim().is_empty()))
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Completeness over the five mandatory fields
    pub fn computed_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Photo change requested by this payload
    pub fn photo_update(&self) -> PhotoUpdate {
        match &self.profile_photo {
            None => PhotoUpdate::Keep,
            Some(None) => PhotoUpdate::Clear,
            Some(Some(s)) if s.is_empty() => PhotoUpdate::Clear,
            Some(Some(s)) => PhotoUpdate::Set(s.clone()),
        }
    }

    /// GST number with empty/blank treated as absent
    pub fn gst_number_normalized(&self) -> Option<&str> {
        self.gst_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// PUT /profile success body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub updated_profile: Profile,
}

/// PATCH /profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFlagUpdate {
    pub is_profile_complete: bool,
}

/// PATCH /profile success body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFlagResponse {
    pub success: bool,
    pub is_profile_complete: bool,
}
