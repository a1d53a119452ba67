use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::extract::AuthUser;
use crate::errors::AppError;
use crate::models::user::{User, UserOut};
use crate::security::{create_access_token, hash_password, verify_password};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserOut>, AppError> {
    let existing: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Validation("Email already registered".to_string()));
    }

    let hashed = hash_password(&req.password)?;

    let user: User = sqlx::query_as(
        "INSERT INTO users (email, full_name, hashed_password) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&req.email)
    .bind(&req.full_name)
    .bind(&hashed)
    .fetch_one(&state.db)
    .await?;

    info!("New user registered: {}", user.email);
    Ok(Json(user.into()))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&req.email)
        .fetch_optional(&state.db)
        .await?;

    let valid = user
        .as_ref()
        .map(|u| verify_password(&req.password, &u.hashed_password))
        .unwrap_or(false);

    let user = match (user, valid) {
        (Some(u), true) => u,
        _ => {
            warn!("Failed login attempt for {}", req.email);
            return Err(AppError::Validation(
                "Incorrect email or password".to_string(),
            ));
        }
    };

    let access_token = create_access_token(
        &user.email,
        &state.config.secret_key,
        state.config.access_token_expire_minutes,
    )?;

    info!("User logged in: {}", user.email);
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /api/v1/users/me
pub async fn handle_me(AuthUser(user): AuthUser) -> Json<UserOut> {
    Json(user.into())
}
