use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::errors::AppError;
use crate::models::user::User;
use crate::security::decode_access_token;
use crate::state::AppState;

/// Extractor for handlers that require a logged-in user.
/// Reads the Bearer token, decodes the JWT, and loads the user row.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let email =
            decode_access_token(token, &state.config.secret_key).ok_or(AppError::Unauthorized)?;

        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&state.db)
            .await?;

        let user = user.ok_or(AppError::Unauthorized)?;
        if !user.is_active {
            return Err(AppError::Forbidden);
        }

        Ok(AuthUser(user))
    }
}
