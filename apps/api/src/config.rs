use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_PROMPTS_FILE: &str = "data/prompts.json";
const DEFAULT_REDIS_KEY: &str = "prompts";

/// Where the prompt templates live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptBackend {
    File { path: PathBuf },
    Redis { url: String, key: String },
}

impl PromptBackend {
    /// Resolves the backend from the raw `PROMPT_STORE` selector and its companion variables.
    pub fn from_parts(
        kind: Option<&str>,
        file: Option<String>,
        redis_url: Option<String>,
        redis_key: Option<String>,
    ) -> Result<Self> {
        match kind.unwrap_or("file") {
            "file" => Ok(PromptBackend::File {
                path: PathBuf::from(file.unwrap_or_else(|| DEFAULT_PROMPTS_FILE.to_string())),
            }),
            "redis" => Ok(PromptBackend::Redis {
                url: redis_url
                    .context("REDIS_URL must be set when PROMPT_STORE=redis")?,
                key: redis_key.unwrap_or_else(|| DEFAULT_REDIS_KEY.to_string()),
            }),
            other => bail!("Unknown PROMPT_STORE '{other}' (expected 'file' or 'redis')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub prompt_backend: PromptBackend,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let prompt_backend = PromptBackend::from_parts(
            std::env::var("PROMPT_STORE").ok().as_deref(),
            std::env::var("PROMPTS_FILE").ok(),
            std::env::var("REDIS_URL").ok(),
            std::env::var("PROMPTS_REDIS_KEY").ok(),
        )?;

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            prompt_backend,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
