use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod guard;
pub mod password;

/// Signed claim set carried by session tokens. Ephemeral, never persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            user_id,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    /// Signature checks out but the expiry has passed
    #[error("Token has expired")]
    Expired,

    /// Cannot parse, or the signature does not verify
    #[error("Token is invalid")]
    Malformed,
}

/// Issue a signed token embedding the user identity claim.
/// Stateless; deterministic given secret and clock.
pub fn issue_token(user_id: Uuid, secret: &str, expiry_hours: u64) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let claims = Claims::new(user_id, expiry_hours);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| TokenError::TokenGeneration(e.to_string()))
}

/// Check signature validity and expiry; all-or-nothing. `Expired` and
/// `Malformed` are distinguished because callers map them to different
/// user-visible messages.
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, TokenError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Ok(data.claims.user_id),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(TokenError::Expired),
            _ => Err(TokenError::Malformed),
        },
    }
}
