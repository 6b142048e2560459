//! Storage backends for the prompt set.
//!
//! Backends only move bytes. Validation and the fallback-to-default policy
//! live in `PromptStore`, so swapping a backend never changes either.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use redis::AsyncCommands;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::prompts::PromptSet;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed prompt document: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("No prompt document stored")]
    Missing,
}

/// Persistence seam for the single, process-wide prompt set.
///
/// Carried in `PromptStore` as `Arc<dyn PromptRepository>`.
#[async_trait]
pub trait PromptRepository: Send + Sync {
    fn name(&self) -> &'static str;

    async fn load(&self) -> Result<PromptSet, StoreError>;

    /// Replaces the stored set wholesale. Readers never observe a partial write.
    async fn save(&self, set: &PromptSet) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// FilePromptRepository — default backend
// ────────────────────────────────────────────────────────────────────────────

/// One pretty-printed JSON document on disk.
pub struct FilePromptRepository {
    path: PathBuf,
}

impl FilePromptRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PromptRepository for FilePromptRepository {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<PromptSet, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn save(&self, set: &PromptSet) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(set)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomically(&path, body.as_bytes()))
            .await
            .map_err(std::io::Error::other)??;

        debug!(path = %self.path.display(), "Prompt document written");
        Ok(())
    }
}

/// Writes to a sibling temp file, then renames it over `path`.
/// Creates the parent directory when it does not exist yet.
fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// RedisPromptRepository — key-value backend
// ────────────────────────────────────────────────────────────────────────────

/// The same JSON document stored under a single Redis key.
pub struct RedisPromptRepository {
    client: redis::Client,
    key: String,
}

impl RedisPromptRepository {
    pub fn new(client: redis::Client, key: impl Into<String>) -> Self {
        Self {
            client,
            key: key.into(),
        }
    }
}

#[async_trait]
impl PromptRepository for RedisPromptRepository {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn load(&self) -> Result<PromptSet, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(self.key.as_str()).await?;
        decode_document(raw)
    }

    async fn save(&self, set: &PromptSet) -> Result<(), StoreError> {
        let body = serde_json::to_string(set)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(self.key.as_str(), body).await?;
        Ok(())
    }
}

/// Decodes the value of a `GET`; a nil reply means nothing was ever saved.
fn decode_document(raw: Option<String>) -> Result<PromptSet, StoreError> {
    let raw = raw.ok_or(StoreError::Missing)?;
    Ok(serde_json::from_str(&raw)?)
}
