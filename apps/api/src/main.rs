mod ats;
mod config;
mod embedding;
mod errors;
mod indexing;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod vector_store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::{Embedder, MiniLmEmbedder};
use crate::indexing::startup::spawn_startup_indexing;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::vector_store::{PineconeStore, VectorStore};

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

    info!("Starting Resume Hunter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize embedding model (blocking: may download weights on first run)
    let embedder: Arc<dyn Embedder> =
        Arc::new(tokio::task::spawn_blocking(MiniLmEmbedder::load).await??);
    info!(
        "Embedding model ready: {} ({} dimensions)",
        embedding::MODEL_NAME,
        embedder.dimensions()
    );

    // Initialize Pinecone
    let store: Arc<dyn VectorStore> = Arc::new(
        PineconeStore::connect(
            config.pinecone_api_key.clone(),
            &config.pinecone_index,
            config.pinecone_index_host.clone(),
            config.pinecone_namespace.clone(),
        )
        .await?,
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Index bundled job files in the background; the supervisor logs the outcome
    spawn_startup_indexing(
        config.job_data_dir.clone(),
        Arc::clone(&embedder),
        Arc::clone(&store),
    );

    // Build app state
    let state = AppState {
        embedder,
        store,
        llm: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the client is served from a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
