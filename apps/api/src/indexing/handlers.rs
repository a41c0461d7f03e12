//! Axum route handlers for the indexing API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::indexing::flatten::IndexItem;
use crate::indexing::upsert::{upsert_documents, DEFAULT_BATCH_SIZE};
use crate::state::AppState;

const DEFAULT_TOP_K: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PushDocsRequest {
    pub items: Vec<IndexItem>,
}

#[derive(Debug, Serialize)]
pub struct PushDocsResponse {
    pub status: &'static str,
    pub inserted_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub matches: Vec<SearchHit>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /push_docs/
///
/// Embeds the given items and upserts them in batches of 50.
pub async fn handle_push_docs(
    State(state): State<AppState>,
    Json(request): Json<PushDocsRequest>,
) -> Result<Json<PushDocsResponse>, AppError> {
    let inserted_ids = upsert_documents(
        &request.items,
        state.embedder.as_ref(),
        state.store.as_ref(),
        DEFAULT_BATCH_SIZE,
    )
    .await?;

    info!(count = inserted_ids.len(), "Inserted IDs: {:?}", inserted_ids);

    Ok(Json(PushDocsResponse {
        status: "success",
        inserted_ids,
    }))
}

/// POST /clear_pinecone/
///
/// Deletes every record in the index namespace.
pub async fn handle_clear_store(
    State(state): State<AppState>,
) -> Result<Json<ClearResponse>, AppError> {
    state.store.delete_all().await?;

    Ok(Json(ClearResponse {
        status: "success",
        message: "Pinecone index cleared.",
    }))
}

/// POST /search/
///
/// Embeds `query` and returns the closest indexed recommendations.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let top_k = request.top_k.unwrap_or(DEFAULT_TOP_K);
    if top_k == 0 {
        return Err(AppError::Validation("top_k must be at least 1".to_string()));
    }
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let query_vector = state
        .embedder
        .embed(vec![request.query])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("embedder returned no vector for the query"))?;

    let matches = state.store.query(query_vector, top_k).await?;

    Ok(Json(SearchResponse {
        matches: matches
            .into_iter()
            .map(|m| SearchHit {
                text: m.text().map(String::from),
                id: m.id,
                score: m.score,
            })
            .collect(),
    }))
}
