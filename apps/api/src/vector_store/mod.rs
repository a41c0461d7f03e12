//! Vector store seam. The service talks to Pinecone in production; tests use
//! an in-memory store with the same upsert semantics.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
pub mod memory;
pub mod pinecone;

pub use pinecone::PineconeStore;

#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("index '{0}' has no data-plane host")]
    MissingHost(String),
}

/// A single vector as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// A nearest-neighbour hit returned by `query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMatch {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl QueryMatch {
    /// The indexed text, if the record carried one.
    pub fn text(&self) -> Option<&str> {
        self.metadata.get("text").and_then(|v| v.as_str())
    }
}

/// Insert-or-update store keyed by record id.
///
/// No ordering or mutual exclusion is promised between concurrent callers.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Upserts one batch. Returns the count the store reports as written.
    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<usize, VectorStoreError>;

    /// Removes every record in the configured namespace.
    async fn delete_all(&self) -> Result<(), VectorStoreError>;

    /// Returns up to `top_k` records closest to `vector`, best first.
    async fn query(&self, vector: Vec<f32>, top_k: usize)
        -> Result<Vec<QueryMatch>, VectorStoreError>;
}
