//! File-to-text extraction for the upload box.
//!
//! Accepts `.txt` (UTF-8, decoded lossily) and Word documents (`.doc`/`.docx`,
//! read as OOXML). The extracted text is returned to the client, which then
//! submits it to `/api/correct` like typed input.

pub mod docx;

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;

/// Upload ceiling for `/api/extract`.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const UNSUPPORTED_MESSAGE: &str =
    "지원하지 않는 파일 형식입니다. txt, doc, docx 파일만 업로드 가능합니다.";
pub const NO_FILE_MESSAGE: &str = "업로드된 파일이 없습니다.";
pub const EMPTY_TEXT_MESSAGE: &str = "파일에서 텍스트를 찾을 수 없습니다.";
pub const EXTRACT_FAILED_MESSAGE: &str = "파일을 읽는 중 오류가 발생했습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Word,
}

impl DocumentKind {
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentKind::PlainText),
            "doc" | "docx" => Some(DocumentKind::Word),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub file_name: String,
    pub text: String,
}

/// Pulls plain text out of an uploaded document.
pub async fn extract_text(kind: DocumentKind, bytes: Vec<u8>) -> Result<String, AppError> {
    let text = match kind {
        DocumentKind::PlainText => decode_plain_text(&bytes),
        DocumentKind::Word => tokio::task::spawn_blocking(move || docx::docx_to_text(&bytes))
            .await
            .map_err(|e| {
                warn!("Word extraction task failed: {e}");
                AppError::Validation(EXTRACT_FAILED_MESSAGE.to_string())
            })?
            .map_err(|e| {
                warn!("Word extraction failed: {e}");
                AppError::Validation(EXTRACT_FAILED_MESSAGE.to_string())
            })?,
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_TEXT_MESSAGE.to_string()));
    }
    Ok(text)
}

fn decode_plain_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let text: &str = &decoded;
    text.strip_prefix('\u{feff}').unwrap_or(text).to_string()
}

/// POST /api/extract
///
/// Multipart form with a `file` field. Returns `{fileName, text}`.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let kind = DocumentKind::from_file_name(&file_name)
            .ok_or_else(|| AppError::Validation(UNSUPPORTED_MESSAGE.to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let text = extract_text(kind, bytes.to_vec()).await?;
        info!(file = %file_name, chars = text.chars().count(), "Extracted upload text");

        return Ok(Json(ExtractResponse { file_name, text }));
    }

    Err(AppError::Validation(NO_FILE_MESSAGE.to_string()))
}
