pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::correction::handlers::handle_correct;
use crate::extract::{handle_extract, MAX_UPLOAD_BYTES};
use crate::prompts::handlers::{handle_get_prompts, handle_save_prompts};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Admin prompt editor
        .route(
            "/api/prompts",
            get(handle_get_prompts).post(handle_save_prompts),
        )
        // Correction
        .route("/api/correct", post(handle_correct))
        .route(
            "/api/extract",
            post(handle_extract).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}
