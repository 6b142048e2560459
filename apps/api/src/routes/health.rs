use axum::{extract::State, Json};
use serde::Serialize;

use crate::llm_client::MODEL;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: &'static str,
    /// Backend serving the prompt templates (`file` or `redis`).
    pub prompt_store: &'static str,
}

/// GET /health
/// Liveness only; the prompt store backend is reported but not contacted.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: MODEL,
        prompt_store: state.prompts.backend(),
    })
}
