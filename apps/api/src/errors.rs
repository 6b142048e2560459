use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message shown when a prompt payload is missing `common`, `styles` or `purposes`.
pub const STRUCTURAL_MESSAGE: &str = "프롬프트 데이터 구조가 올바르지 않습니다.";
pub const PERSISTENCE_MESSAGE: &str = "프롬프트 저장 중 오류가 발생했습니다.";
pub const UPSTREAM_MESSAGE: &str = "API 처리 중 오류가 발생했습니다.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": <message>, "code": <CODE>}`. The detail
/// carried by server-side variants is logged, never sent to the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing caller input. The message is user-facing.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed prompt set: {0}")]
    Structural(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Upstream completion error: {0}")]
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Structural(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Structural(detail) => {
                tracing::warn!("Rejected prompt set: {detail}");
                ("STRUCTURAL_ERROR", STRUCTURAL_MESSAGE.to_string())
            }
            AppError::Persistence(detail) => {
                tracing::error!("Persistence error: {detail}");
                ("PERSISTENCE_ERROR", PERSISTENCE_MESSAGE.to_string())
            }
            AppError::Upstream(detail) => {
                tracing::error!("Upstream completion error: {detail}");
                ("UPSTREAM_ERROR", UPSTREAM_MESSAGE.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code
        }));

        (self.status(), body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("잘못된 요청 형식입니다: {}", rejection.body_text()))
    }
}
