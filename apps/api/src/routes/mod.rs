pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers::handle_ats_check;
use crate::indexing::handlers::{handle_clear_store, handle_push_docs, handle_search};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Indexing API
        .route("/push_docs/", post(handle_push_docs))
        .route("/clear_pinecone/", post(handle_clear_store))
        .route("/search/", post(handle_search))
        // Scoring API
        .route("/ats_check/", post(handle_ats_check))
        .with_state(state)
}
