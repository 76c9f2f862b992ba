//! Merchant JWT authentication for the profile and receipt API

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// JWT claims for merchant authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct MerchantClaims {
    /// Merchant ID
    pub sub: String,
    /// Merchant public handle
    pub superkey: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated merchant identity extracted from JWT
#[derive(Debug, Clone)]
pub struct MerchantIdentity {
    pub merchant_id: String,
    pub superkey: String,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for a merchant
pub fn create_token(
    merchant_id: &str,
    superkey: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = MerchantClaims {
        sub: merchant_id.to_string(),
        superkey: superkey.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a bearer token and map failures to the user-facing auth errors.
///
/// An expired token is reported separately from an invalid one so the client
/// can show "session expired" instead of a generic login prompt.
fn verify_token(token: &str, secret: &str) -> Result<MerchantIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<MerchantClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::session_expired(),
            _ => AppError::invalid_token("Invalid authentication token"),
        }
    })?;

    Ok(MerchantIdentity {
        merchant_id: token_data.claims.sub,
        superkey: token_data.claims.superkey,
    })
}

fn identity_from_headers(
    headers: &http::HeaderMap,
    secret: &str,
) -> Result<MerchantIdentity, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::not_authenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(AppError::not_authenticated)?;

    verify_token(token, secret)
}

/// Middleware that extracts and verifies the merchant JWT from the
/// Authorization header, then injects [`MerchantIdentity`] into request
/// extensions for handlers
pub async fn merchant_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = identity_from_headers(request.headers(), &state.jwt_secret)?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Typed extractor for the authenticated merchant.
///
/// Reads the identity the auth middleware stored in request extensions;
/// outside the protected router it validates the Authorization header itself.
impl FromRequestParts<AppState> for MerchantIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<MerchantIdentity>() {
            return Ok(identity.clone());
        }

        let identity = identity_from_headers(&parts.headers, &state.jwt_secret)?;
        parts.extensions.insert(identity.clone());
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = create_token("m-123", "SUPER-1", "test-secret").unwrap();
        let identity = verify_token(&token, "test-secret").unwrap();
        assert_eq!(identity.merchant_id, "m-123");
        assert_eq!(identity.superkey, "SUPER-1");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("m-123", "SUPER-1", "test-secret").unwrap();
        let err = verify_token(&token, "other-secret").unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let err = verify_token("not.a.jwt", "test-secret").unwrap_err();
        assert_eq!(err.code, shared::error::ErrorCode::TokenInvalid);
    }
}
