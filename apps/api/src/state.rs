use std::sync::Arc;

use crate::config::Config;
use crate::embedding::Embedder;
use crate::llm_client::TextGenerator;
use crate::vector_store::VectorStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Collaborators are trait objects so tests can swap in in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    /// Sentence embedder used for indexing and search. Default: MiniLM via fastembed.
    pub embedder: Arc<dyn Embedder>,
    /// Remote vector index. Default: Pinecone.
    pub store: Arc<dyn VectorStore>,
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
