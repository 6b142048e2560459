mod config;
mod correction;
mod errors;
mod extract;
mod llm_client;
mod prompts;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, PromptBackend};
use crate::llm_client::LlmClient;
use crate::prompts::repository::{FilePromptRepository, PromptRepository, RedisPromptRepository};
use crate::prompts::store::PromptStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting correction API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize prompt store
    let repository = build_prompt_repository(&config.prompt_backend)?;
    info!("Prompt store initialized (backend: {})", repository.name());

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        prompts: PromptStore::new(repository),
        llm: Arc::new(llm),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_prompt_repository(backend: &PromptBackend) -> Result<Arc<dyn PromptRepository>> {
    let repository: Arc<dyn PromptRepository> = match backend {
        PromptBackend::File { path } => {
            info!("Prompt templates at {}", path.display());
            Arc::new(FilePromptRepository::new(path.clone()))
        }
        PromptBackend::Redis { url, key } => {
            let client = redis::Client::open(url.as_str())?;
            info!("Prompt templates in Redis key '{key}'");
            Arc::new(RedisPromptRepository::new(client, key.clone()))
        }
    };
    Ok(repository)
}
