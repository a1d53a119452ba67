use axum::{extract::State, Json};
use tracing::info;

use crate::auth::extract::AuthUser;
use crate::dvi::scoring::{
    compute_overall_and_level, compute_pilot_dvi, DviCalculationInput, DviPillars, PilotDvi,
};
use crate::errors::AppError;
use crate::models::dvi::DviRecordRow;
use crate::state::AppState;

/// Range check for the record path. The scoring core trusts its input, so
/// out-of-range values are rejected here at the boundary.
fn validate_scores(input: &DviCalculationInput) -> Result<(), AppError> {
    let fields = [
        ("finance_score", input.finance_score),
        ("logistics_score", input.logistics_score),
        ("health_score", input.health_score),
        ("education_score", input.education_score),
        ("wellbeing_score", input.wellbeing_score),
    ];
    for (name, value) in fields {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(AppError::Validation(format!(
                "{name} must be between 0 and 100"
            )));
        }
    }
    Ok(())
}

/// POST /api/v1/dvi/calculate
/// Computes the 5-pillar record DVI and persists it for the current user.
pub async fn handle_calculate(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<DviCalculationInput>,
) -> Result<Json<DviRecordRow>, AppError> {
    validate_scores(&payload)?;

    let (overall, level) = compute_overall_and_level(&payload);

    let record: DviRecordRow = sqlx::query_as(
        r#"
        INSERT INTO dvi_records
            (user_id, finance_score, logistics_score, health_score,
             education_score, wellbeing_score, overall_score, level)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(payload.finance_score)
    .bind(payload.logistics_score)
    .bind(payload.health_score)
    .bind(payload.education_score)
    .bind(payload.wellbeing_score)
    .bind(overall)
    .bind(level.as_str())
    .fetch_one(&state.db)
    .await?;

    info!(
        "DVI calculated for user {}: {:.1} ({})",
        user.email, overall, level
    );
    Ok(Json(record))
}

/// POST /api/v1/dvi/score
/// Stateless 4-pillar pilot scoring; nothing is persisted and no auth is
/// required (the pilot frontend calls this before signup).
pub async fn handle_score(Json(payload): Json<DviPillars>) -> Json<PilotDvi> {
    Json(compute_pilot_dvi(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(v: f64) -> DviCalculationInput {
        DviCalculationInput {
            finance_score: v,
            logistics_score: v,
            health_score: v,
            education_score: v,
            wellbeing_score: v,
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(validate_scores(&input(0.0)).is_ok());
        assert!(validate_scores(&input(100.0)).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(validate_scores(&input(100.1)).is_err());
        assert!(validate_scores(&input(-0.1)).is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut bad = input(50.0);
        bad.health_score = f64::NAN;
        assert!(validate_scores(&bad).is_err());
    }

    #[test]
    fn test_validate_names_offending_field() {
        let mut bad = input(50.0);
        bad.education_score = 250.0;
        let err = validate_scores(&bad).unwrap_err();
        assert!(err.to_string().contains("education_score"));
    }
}
