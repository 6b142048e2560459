use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::prompts::repository::PromptRepository;
use crate::prompts::PromptSet;

/// Read/write policy over a `PromptRepository`.
///
/// Reads are infallible: anything the backend cannot produce (absent,
/// unreadable, malformed) is replaced by `PromptSet::default()` so corrections
/// keep working. Writes are strict: an invalid payload is rejected before the
/// backend is touched. No caching; every read goes to the backend.
#[derive(Clone)]
pub struct PromptStore {
    repo: Arc<dyn PromptRepository>,
}

impl PromptStore {
    pub fn new(repo: Arc<dyn PromptRepository>) -> Self {
        Self { repo }
    }

    pub fn backend(&self) -> &'static str {
        self.repo.name()
    }

    pub async fn read(&self) -> PromptSet {
        match self.repo.load().await {
            Ok(set) => set,
            Err(e) => {
                warn!(
                    backend = self.repo.name(),
                    error = %e,
                    "Prompt set unavailable, using built-in defaults"
                );
                PromptSet::default()
            }
        }
    }

    /// Validates `payload` and replaces the stored set with it. Last writer wins.
    pub async fn write(&self, payload: Value) -> Result<PromptSet, AppError> {
        let set = validate_prompt_set(payload)?;

        self.repo
            .save(&set)
            .await
            .map_err(|e| AppError::Persistence(e.to_string()))?;

        info!(
            backend = self.repo.name(),
            styles = set.styles.len(),
            purposes = set.purposes.len(),
            "Prompt set saved"
        );
        Ok(set)
    }
}

/// Checks the raw payload shape and converts it into a `PromptSet`.
///
/// `common` must be a non-empty string; `styles` and `purposes` must be objects
/// whose values are strings. Keys are not restricted.
pub fn validate_prompt_set(payload: Value) -> Result<PromptSet, AppError> {
    let common_ok = matches!(payload.get("common"), Some(Value::String(s)) if !s.is_empty());
    let styles_ok = matches!(payload.get("styles"), Some(Value::Object(_)));
    let purposes_ok = matches!(payload.get("purposes"), Some(Value::Object(_)));

    if !(common_ok && styles_ok && purposes_ok) {
        return Err(AppError::Structural(
            "common, styles and purposes are required".to_string(),
        ));
    }

    serde_json::from_value(payload).map_err(|e| AppError::Structural(e.to_string()))
}
