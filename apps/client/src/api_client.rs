//! HTTP client for the resume-hunter API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ClientError;

/// Anything that can run an ATS check for one resume.
#[async_trait]
pub trait AtsBackend: Send + Sync {
    async fn ats_check(&self, resume_text: &str, job_description: &str)
        -> Result<String, ClientError>;
}

#[derive(Debug, Serialize)]
struct AtsCheckRequest<'a> {
    resume_text: &'a str,
    job_description: &'a str,
}

#[derive(Debug, Deserialize)]
struct AtsCheckResponse {
    output: String,
}

#[derive(Debug, Deserialize)]
struct ClearResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST /clear_pinecone/ — returns the server's confirmation message.
    pub async fn clear_store(&self) -> Result<String, ClientError> {
        let response = self.client.post(self.url("/clear_pinecone/")).send().await?;
        let cleared: ClearResponse = check_status(response).await?.json().await?;
        Ok(cleared.message)
    }
}

#[async_trait]
impl AtsBackend for ApiClient {
    async fn ats_check(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url("/ats_check/"))
            .json(&AtsCheckRequest {
                resume_text,
                job_description,
            })
            .send()
            .await?;
        let result: AtsCheckResponse = check_status(response).await?.json().await?;
        debug!(chars = result.output.len(), "ATS check returned");
        Ok(result.output)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: api_error_message(body),
    })
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
