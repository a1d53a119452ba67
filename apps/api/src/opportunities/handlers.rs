use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::opportunity::{OpportunityCreate, OpportunityRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OpportunityFilter {
    /// When set, only opportunities whose `relevance_min_dvi` is NULL or at
    /// most this value are returned.
    pub min_dvi: Option<f64>,
}

/// POST /api/v1/opportunities
/// Open endpoint: opportunity seeding happens before any user logs in.
pub async fn handle_create(
    State(state): State<AppState>,
    Json(payload): Json<OpportunityCreate>,
) -> Result<Json<OpportunityRow>, AppError> {
    let opportunity: OpportunityRow = sqlx::query_as(
        r#"
        INSERT INTO opportunities
            (title, category, short_description, full_description,
             location, link, relevance_min_dvi)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.category)
    .bind(&payload.short_description)
    .bind(&payload.full_description)
    .bind(&payload.location)
    .bind(&payload.link)
    .bind(payload.relevance_min_dvi)
    .fetch_one(&state.db)
    .await?;

    info!("Opportunity '{}' created", opportunity.title);
    Ok(Json(opportunity))
}

/// GET /api/v1/opportunities?min_dvi=
pub async fn handle_list(
    State(state): State<AppState>,
    Query(filter): Query<OpportunityFilter>,
) -> Result<Json<Vec<OpportunityRow>>, AppError> {
    let opportunities: Vec<OpportunityRow> = match filter.min_dvi {
        Some(min_dvi) => {
            sqlx::query_as(
                r#"
                SELECT * FROM opportunities
                WHERE relevance_min_dvi IS NULL OR relevance_min_dvi <= $1
                ORDER BY created_at DESC
                "#,
            )
            .bind(min_dvi)
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM opportunities ORDER BY created_at DESC")
                .fetch_all(&state.db)
                .await?
        }
    };

    Ok(Json(opportunities))
}
