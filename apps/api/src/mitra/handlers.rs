use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::extract::AuthUser;
use crate::dvi::scoring::{infer_dvi_from_text, DviPillars};
use crate::errors::AppError;
use crate::llm_client::ChatTurn;
use crate::mitra::prompts::build_system_prompt;
use crate::models::dvi::DviRecordRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MitraChatRequest {
    pub message: String,
    pub history: Option<Vec<ChatTurn>>,
}

#[derive(Debug, Serialize)]
pub struct MitraChatResponse {
    pub reply: String,
    /// Heuristic DVI suggestion derived from the user message. The frontend
    /// offers it as a one-click update to the user's pillar values.
    pub dvi_suggestion: DviPillars,
}

/// POST /api/v1/mitra/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<MitraChatRequest>,
) -> Result<Json<MitraChatResponse>, AppError> {
    let last_dvi: Option<DviRecordRow> = sqlx::query_as(
        "SELECT * FROM dvi_records WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?;

    let system_prompt = build_system_prompt(&user, last_dvi.as_ref());
    let history = req.history.unwrap_or_default();

    let reply = state.mitra.reply(&system_prompt, &history, &req.message).await?;

    // Always computed, whichever backend answered
    let dvi_suggestion = infer_dvi_from_text(&req.message);

    info!("Mitra reply generated for {}", user.email);
    Ok(Json(MitraChatResponse {
        reply,
        dvi_suggestion,
    }))
}
