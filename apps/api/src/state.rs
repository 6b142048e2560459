use std::sync::Arc;

use crate::llm_client::CompletionProvider;
use crate::prompts::store::PromptStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub prompts: PromptStore,
    /// Pluggable completion backend. Production: `LlmClient`.
    pub llm: Arc<dyn CompletionProvider>,
}
