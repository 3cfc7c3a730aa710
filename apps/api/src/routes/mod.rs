pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai;
use crate::state::AppState;
use crate::transforms::handlers as transforms;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // AI endpoints
        .route("/api/ai/rewrite", post(ai::handle_rewrite))
        .route("/api/ai/fix-grammar", post(ai::handle_fix_grammar))
        .route("/api/ai/resume-optimize", post(ai::handle_resume_optimize))
        // Deterministic transforms
        .route("/api/transform", post(transforms::handle_transform))
        .route("/api/transform/preset", post(transforms::handle_preset))
        .route(
            "/api/transform/operations",
            get(transforms::handle_catalog),
        )
        .route(
            "/api/tool-of-the-day",
            get(transforms::handle_tool_of_the_day),
        )
        .with_state(state)
}
