//! Axum route handler for the ATS check.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ats::run_ats_check;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AtsCheckRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AtsCheckResponse {
    pub output: String,
}

/// POST /ats_check/
///
/// Both fields must be present; their contents are passed through as-is.
pub async fn handle_ats_check(
    State(state): State<AppState>,
    Json(request): Json<AtsCheckRequest>,
) -> Result<Json<AtsCheckResponse>, AppError> {
    let output = run_ats_check(
        &request.resume_text,
        &request.job_description,
        state.llm.as_ref(),
    )
    .await?;

    Ok(Json(AtsCheckResponse { output }))
}
