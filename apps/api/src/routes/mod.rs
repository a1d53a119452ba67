pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::dvi::handlers as dvi_handlers;
use crate::mitra::handlers as mitra_handlers;
use crate::opportunities::handlers as opportunity_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth_handlers::handle_register))
        .route("/api/v1/auth/login", post(auth_handlers::handle_login))
        .route("/api/v1/users/me", get(auth_handlers::handle_me))
        // DVI
        .route("/api/v1/dvi/calculate", post(dvi_handlers::handle_calculate))
        .route("/api/v1/dvi/score", post(dvi_handlers::handle_score))
        // Mitra chat
        .route("/api/v1/mitra/chat", post(mitra_handlers::handle_chat))
        // Opportunities
        .route(
            "/api/v1/opportunities",
            post(opportunity_handlers::handle_create).get(opportunity_handlers::handle_list),
        )
        .with_state(state)
}
