use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OpportunityRow {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub short_description: String,
    pub full_description: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    /// Minimum overall DVI for which this opportunity is considered relevant.
    /// NULL means relevant to everyone.
    pub relevance_min_dvi: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpportunityCreate {
    pub title: String,
    pub category: String,
    pub short_description: String,
    pub full_description: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub relevance_min_dvi: Option<f64>,
}
