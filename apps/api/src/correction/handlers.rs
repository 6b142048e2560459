use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::correction::service::{correct, CorrectionRequest, CorrectionResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/correct
///
/// Returns `{correctedText}`; blank input is a 400, upstream failure a 500.
pub async fn handle_correct(
    State(state): State<AppState>,
    request: Result<Json<CorrectionRequest>, JsonRejection>,
) -> Result<Json<CorrectionResponse>, AppError> {
    let Json(request) = request?;
    let response = correct(&state.prompts, state.llm.as_ref(), request).await?;
    Ok(Json(response))
}
