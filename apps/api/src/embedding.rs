//! Sentence embeddings for indexed job text.
//!
//! The service embeds with `all-MiniLM-L6-v2` through fastembed (ONNX runtime).
//! The model is loaded once at startup and shared behind `Arc<dyn Embedder>`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use thiserror::Error;
use tracing::{debug, info};

/// Name of the embedding model, as reported in logs.
pub const MODEL_NAME: &str = "all-MiniLM-L6-v2";
/// Output dimensionality of `all-MiniLM-L6-v2`.
pub const DIMENSIONS: usize = 384;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to load embedding model: {0}")]
    Load(String),

    #[error("embedding failed: {0}")]
    Encode(String),

    #[error("embedding model returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("embedding task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Turns text into fixed-length vectors, one per input, in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn dimensions(&self) -> usize;
}

/// Local MiniLM embedder. Inference is CPU-bound and runs on the blocking pool.
pub struct MiniLmEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl MiniLmEmbedder {
    /// Loads (downloading on first use) the MiniLM model.
    pub fn load() -> Result<Self, EmbeddingError> {
        info!("Loading embedding model {MODEL_NAME}...");
        let model = TextEmbedding::try_new(InitOptions::new(EmbeddingModel::AllMiniLML6V2))
            .map_err(|e| EmbeddingError::Load(e.to_string()))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

#[async_trait]
impl Embedder for MiniLmEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let expected = texts.len();
        let model = Arc::clone(&self.model);

        let vectors = tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|_| EmbeddingError::Encode("embedding model lock poisoned".to_string()))?;
            model
                .embed(texts, None)
                .map_err(|e| EmbeddingError::Encode(e.to_string()))
        })
        .await??;

        if vectors.len() != expected {
            return Err(EmbeddingError::CountMismatch {
                expected,
                got: vectors.len(),
            });
        }

        debug!(count = expected, "Computed embeddings");
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        DIMENSIONS
    }
}
