use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row. Never serialized directly (it carries the password hash);
/// handlers convert to `UserOut` first.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub full_name: Option<String>,
    pub hashed_password: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Public user shape returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct UserOut {
    pub id: i32,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub is_active: bool,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        UserOut {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            is_active: user.is_active,
        }
    }
}
