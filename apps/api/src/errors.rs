use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::indexing::flatten::FlattenError;
use crate::llm_client::LlmError;
use crate::vector_store::VectorStoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Downstream failures keep their message in the response body so callers
/// see what went wrong without reading server logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Vector store error: {0}")]
    VectorStore(#[from] VectorStoreError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Job data error: {0}")]
    JobData(#[from] FlattenError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Embedding(_) => (StatusCode::BAD_GATEWAY, "EMBEDDING_ERROR"),
            AppError::VectorStore(_) => (StatusCode::BAD_GATEWAY, "VECTOR_STORE_ERROR"),
            AppError::Llm(_) => (StatusCode::BAD_GATEWAY, "LLM_ERROR"),
            AppError::JobData(_) => (StatusCode::UNPROCESSABLE_ENTITY, "JOB_DATA_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// The message returned to the caller: the inner error text without the variant prefix.
    fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Embedding(e) => e.to_string(),
            AppError::VectorStore(e) => e.to_string(),
            AppError::Llm(e) => e.to_string(),
            AppError::JobData(e) => e.to_string(),
            AppError::Internal(e) => e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.public_message();

        if status.is_server_error() {
            tracing::error!(code, "{self}");
        } else {
            tracing::warn!(code, "{self}");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
