//! Password hashing and access-token issuance.
//!
//! bcrypt for password storage, HS256 JWTs with an email subject and an
//! expiry derived from `ACCESS_TOKEN_EXPIRE_MINUTES`.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User email.
    pub sub: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).context("Failed to hash password")
}

pub fn verify_password(plain_password: &str, hashed_password: &str) -> bool {
    bcrypt::verify(plain_password, hashed_password).unwrap_or(false)
}

pub fn create_access_token(subject: &str, secret: &str, expire_minutes: i64) -> Result<String> {
    let expire = Utc::now() + Duration::minutes(expire_minutes);
    let claims = Claims {
        sub: subject.to_string(),
        exp: expire.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode access token")
}

/// Returns the token subject (user email), or `None` for any invalid,
/// malformed, or expired token.
pub fn decode_access_token(token: &str, secret: &str) -> Option<String> {
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => Some(data.claims.sub),
        Err(e) => {
            warn!("JWT decode failed: {e}");
            None
        }
    }
}
