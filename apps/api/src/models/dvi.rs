use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted DVI calculation. Field names are part of the API contract.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DviRecordRow {
    pub id: i32,
    pub user_id: i32,
    pub finance_score: f64,
    pub logistics_score: f64,
    pub health_score: f64,
    pub education_score: f64,
    pub wellbeing_score: f64,
    pub overall_score: f64,
    pub level: String,
    pub created_at: DateTime<Utc>,
}
