//! Axum route handlers for the admin prompt editor.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::prompts::PromptSet;
use crate::state::AppState;

pub const SAVED_MESSAGE: &str = "프롬프트가 성공적으로 저장되었습니다.";

#[derive(Debug, Serialize)]
pub struct SavePromptsResponse {
    pub message: String,
}

/// GET /api/prompts
pub async fn handle_get_prompts(State(state): State<AppState>) -> Json<PromptSet> {
    Json(state.prompts.read().await)
}

/// POST /api/prompts
///
/// Replaces the whole prompt set. An unparseable body is a structural error,
/// same as a body missing `common`, `styles` or `purposes`.
pub async fn handle_save_prompts(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SavePromptsResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Structural(e.body_text()))?;

    state.prompts.write(payload).await?;

    Ok(Json(SavePromptsResponse {
        message: SAVED_MESSAGE.to_string(),
    }))
}
