pub mod analyze;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(analyze::handle_options))
        .route("/api/v1/analyze", post(analyze::handle_analyze))
        .route("/api/v1/summarize", post(analyze::handle_summarize))
        .with_state(state)
}
