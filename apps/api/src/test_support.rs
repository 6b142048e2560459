//! Shared fixtures for unit and router tests.

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::llm_client::{CompletionProvider, GenerationConfig, LlmError};
use crate::prompts::repository::FilePromptRepository;
use crate::prompts::store::PromptStore;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub text: String,
    pub config: GenerationConfig,
}

/// Completion provider returning canned text and recording every call.
pub struct StubProvider {
    reply: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(
        &self,
        system: &str,
        text: &str,
        config: &GenerationConfig,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            text: text.to_string(),
            config: *config,
        });
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "stubbed outage".to_string(),
        })
    }
}

/// App state over a file store inside `dir` and the given provider.
pub fn test_state(dir: &tempfile::TempDir, provider: Arc<StubProvider>) -> AppState {
    AppState {
        prompts: PromptStore::new(Arc::new(FilePromptRepository::new(
            dir.path().join("data").join("prompts.json"),
        ))),
        llm: provider,
    }
}

/// `word/document.xml` body with one single-run paragraph per entry.
pub fn document_xml(paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    )
}

/// Minimal `.docx` archive holding only the main document part.
pub fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer
        .write_all(document_xml(paragraphs).as_bytes())
        .unwrap();
    writer.finish().unwrap().into_inner()
}
