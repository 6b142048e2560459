use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{CompletionProvider, CORRECTION_CONFIG};
use crate::prompts::composer::compose;
use crate::prompts::store::PromptStore;

pub const EMPTY_INPUT_MESSAGE: &str = "입력 문장이 필요합니다.";

/// Body of `POST /api/correct`. Every field tolerates `null` or absence;
/// a missing style or purpose selects no fragment.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    #[serde(default)]
    pub input_text: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub additional_request: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResponse {
    pub corrected_text: String,
}

/// Runs one correction end to end. Rejects blank input before any upstream call.
pub async fn correct(
    store: &PromptStore,
    provider: &dyn CompletionProvider,
    request: CorrectionRequest,
) -> Result<CorrectionResponse, AppError> {
    let input_text = request.input_text.unwrap_or_default();
    if input_text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_INPUT_MESSAGE.to_string()));
    }

    let style = request.style.unwrap_or_default();
    let purpose = request.purpose.unwrap_or_default();

    let prompts = store.read().await;
    let system = compose(
        &prompts,
        &style,
        &purpose,
        request.additional_request.as_deref(),
    );

    let raw = provider
        .complete(&system, &input_text, &CORRECTION_CONFIG)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    info!(
        style = %style,
        purpose = %purpose,
        input_chars = input_text.chars().count(),
        output_chars = raw.chars().count(),
        "Correction completed"
    );

    Ok(CorrectionResponse {
        corrected_text: unwrap_corrected_text(&raw),
    })
}

/// Returns the `correctedText` string if `raw` is a JSON object carrying one,
/// otherwise `raw` unchanged.
pub fn unwrap_corrected_text(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => match map.get("correctedText") {
            Some(Value::String(text)) => text.clone(),
            _ => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::prompts::composer::{PURPOSE_HEADER, STYLE_HEADER};
    use crate::prompts::repository::FilePromptRepository;
    use crate::test_support::StubProvider;

    fn request(input: &str, style: &str, purpose: &str) -> CorrectionRequest {
        CorrectionRequest {
            input_text: Some(input.to_string()),
            style: Some(style.to_string()),
            purpose: Some(purpose.to_string()),
            additional_request: None,
        }
    }

    fn default_store(dir: &tempfile::TempDir) -> PromptStore {
        PromptStore::new(Arc::new(FilePromptRepository::new(
            dir.path().join("prompts.json"),
        )))
    }

    #[test]
    fn test_unwrap_json_envelope() {
        assert_eq!(unwrap_corrected_text(r#"{"correctedText":"Hello."}"#), "Hello.");
    }

    #[test]
    fn test_unwrap_plain_text_passes_through() {
        assert_eq!(unwrap_corrected_text("Hello."), "Hello.");
    }

    #[test]
    fn test_unwrap_json_without_field_returns_raw() {
        assert_eq!(unwrap_corrected_text(r#"{"foo":"bar"}"#), r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_unwrap_non_object_json_returns_raw() {
        assert_eq!(unwrap_corrected_text(r#""quoted""#), r#""quoted""#);
        assert_eq!(unwrap_corrected_text("42"), "42");
    }

    #[test]
    fn test_unwrap_non_string_field_returns_raw() {
        let raw = r#"{"correctedText":null}"#;
        assert_eq!(unwrap_corrected_text(raw), raw);
    }

    #[test]
    fn test_unwrap_fenced_envelope_returns_raw() {
        let raw = "```json\n{\"correctedText\":\"Hello.\"}\n```";
        assert_eq!(unwrap_corrected_text(raw), raw);
    }

    #[test]
    fn test_unwrap_envelope_with_surrounding_whitespace() {
        assert_eq!(
            unwrap_corrected_text("\n  {\"correctedText\":\"Hello.\"}\n"),
            "Hello."
        );
    }

    #[test]
    fn test_request_accepts_camel_case_and_nulls() {
        let req: CorrectionRequest = serde_json::from_value(json!({
            "inputText": "문장",
            "style": null,
            "additionalRequest": "짧게"
        }))
        .unwrap();
        assert_eq!(req.input_text.as_deref(), Some("문장"));
        assert_eq!(req.style, None);
        assert_eq!(req.purpose, None);
        assert_eq!(req.additional_request.as_deref(), Some("짧게"));
    }

    #[tokio::test]
    async fn test_empty_input_rejected_without_upstream_call() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::replying("unused");

        let result = correct(
            &default_store(&dir),
            &provider,
            request("", "formal", "document"),
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_input_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::replying("unused");

        let result = correct(
            &default_store(&dir),
            &provider,
            request("  \n\t ", "formal", "document"),
        )
        .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sends_composed_instruction_and_user_text() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::replying("보고서를 제출했습니다.");
        let mut req = request("보고서 제출함", "formal", "internal");
        req.additional_request = Some("간결하게".to_string());

        let response = correct(&default_store(&dir), &provider, req).await.unwrap();

        assert_eq!(response.corrected_text, "보고서를 제출했습니다.");
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text, "보고서 제출함");
        assert_eq!(
            calls[0].system,
            compose(&crate::prompts::PromptSet::default(), "formal", "internal", Some("간결하게"))
        );
        assert_eq!(calls[0].config, CORRECTION_CONFIG);
    }

    #[tokio::test]
    async fn test_unknown_style_still_reaches_upstream() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::replying("ok");

        correct(
            &default_store(&dir),
            &provider,
            request("문장입니다", "unknown-key", "document"),
        )
        .await
        .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0]
            .system
            .contains(&format!("{STYLE_HEADER}\n\n\n{PURPOSE_HEADER}")));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_upstream_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::failing();

        let result = correct(
            &default_store(&dir),
            &provider,
            request("문장", "formal", "document"),
        )
        .await;

        assert!(matches!(result, Err(AppError::Upstream(_))));
        assert_eq!(provider.calls().len(), 1, "no retry on failure");
    }

    #[tokio::test]
    async fn test_json_envelope_unwrapped_in_response() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StubProvider::replying(r#"{"correctedText":"Hello."}"#);

        let response = correct(
            &default_store(&dir),
            &provider,
            request("hello", "informal", "external"),
        )
        .await
        .unwrap();

        assert_eq!(response.corrected_text, "Hello.");
    }
}
