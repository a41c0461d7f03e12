//! Pinecone data-plane client over REST.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{QueryMatch, VectorRecord, VectorStore, VectorStoreError};

const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";
const API_VERSION: &str = "2024-07";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
    namespace: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteAllRequest<'a> {
    delete_all: bool,
    namespace: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    namespace: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct DescribeIndexResponse {
    host: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PineconeError {
    message: Option<String>,
    error: Option<PineconeErrorBody>,
}

#[derive(Debug, Deserialize)]
struct PineconeErrorBody {
    message: String,
}

/// Client bound to a single Pinecone index and namespace.
#[derive(Clone)]
pub struct PineconeStore {
    client: Client,
    api_key: String,
    host: String,
    namespace: String,
}

impl PineconeStore {
    /// Connects to `index`. When `host` is `None` it is looked up through the control plane.
    pub async fn connect(
        api_key: String,
        index: &str,
        host: Option<String>,
        namespace: String,
    ) -> Result<Self, VectorStoreError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        let host = match host {
            Some(h) => h,
            None => describe_index_host(&client, &api_key, index).await?,
        };
        let host = normalize_host(&host);

        info!(index, host = %host, "Pinecone index resolved");

        Ok(Self {
            client,
            api_key,
            host,
            namespace,
        })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, VectorStoreError> {
        let response = self
            .client
            .post(format!("{}{path}", self.host))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(body)
            .send()
            .await?;
        check_status(response).await
    }
}

#[async_trait]
impl VectorStore for PineconeStore {
    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<usize, VectorStoreError> {
        let response = self
            .post(
                "/vectors/upsert",
                &UpsertRequest {
                    vectors: &records,
                    namespace: &self.namespace,
                },
            )
            .await?;
        let ack: UpsertResponse = response.json().await?;
        debug!(sent = records.len(), upserted = ack.upserted_count, "Pinecone upsert");
        Ok(ack.upserted_count)
    }

    async fn delete_all(&self) -> Result<(), VectorStoreError> {
        self.post(
            "/vectors/delete",
            &DeleteAllRequest {
                delete_all: true,
                namespace: &self.namespace,
            },
        )
        .await?;
        info!(namespace = %self.namespace, "Pinecone namespace cleared");
        Ok(())
    }

    async fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<QueryMatch>, VectorStoreError> {
        let response = self
            .post(
                "/query",
                &QueryRequest {
                    vector: &vector,
                    top_k,
                    include_metadata: true,
                    include_values: false,
                    namespace: &self.namespace,
                },
            )
            .await?;
        let result: QueryResponse = response.json().await?;
        Ok(result.matches)
    }
}

async fn describe_index_host(
    client: &Client,
    api_key: &str,
    index: &str,
) -> Result<String, VectorStoreError> {
    let response = client
        .get(format!("{CONTROL_PLANE_URL}/indexes/{index}"))
        .header("Api-Key", api_key)
        .header("X-Pinecone-API-Version", API_VERSION)
        .send()
        .await?;
    let described: DescribeIndexResponse = check_status(response).await?.json().await?;
    described
        .host
        .filter(|h| !h.is_empty())
        .ok_or_else(|| VectorStoreError::MissingHost(index.to_string()))
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, VectorStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(VectorStoreError::Api {
        status: status.as_u16(),
        message: api_error_message(body),
    })
}

/// Pinecone reports errors either as `{"message": ..}` or `{"error": {"message": ..}}`.
fn api_error_message(body: String) -> String {
    match serde_json::from_str::<PineconeError>(&body) {
        Ok(PineconeError {
            error: Some(inner), ..
        }) => inner.message,
        Ok(PineconeError {
            message: Some(message),
            ..
        }) => message,
        _ => body,
    }
}

/// The control plane returns a bare hostname; requests need a scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host_adds_scheme() {
        assert_eq!(
            normalize_host("shlrag-abc123.svc.aped-4627-b74a.pinecone.io"),
            "https://shlrag-abc123.svc.aped-4627-b74a.pinecone.io"
        );
    }

    #[test]
    fn test_normalize_host_keeps_scheme_and_trims_slash() {
        assert_eq!(
            normalize_host("http://localhost:5081/"),
            "http://localhost:5081"
        );
    }

    #[test]
    fn test_upsert_request_uses_pinecone_field_names() {
        let mut metadata = serde_json::Map::new();
        metadata.insert("text".to_string(), serde_json::json!("{\"name\":\"Verify\"}"));
        let records = vec![VectorRecord {
            id: "java-dev-0".to_string(),
            values: vec![0.5, -0.25],
            metadata,
        }];
        let body = serde_json::to_value(UpsertRequest {
            vectors: &records,
            namespace: "",
        })
        .unwrap();

        assert_eq!(body["vectors"][0]["id"], "java-dev-0");
        assert_eq!(body["vectors"][0]["values"][1], -0.25);
        assert_eq!(body["vectors"][0]["metadata"]["text"], "{\"name\":\"Verify\"}");
        assert_eq!(body["namespace"], "");
    }

    #[test]
    fn test_delete_all_request_shape() {
        let body = serde_json::to_value(DeleteAllRequest {
            delete_all: true,
            namespace: "jobs",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"deleteAll": true, "namespace": "jobs"}));
    }

    #[test]
    fn test_query_response_parses_matches() {
        let json = r#"{
            "matches": [
                {"id": "java-dev-3", "score": 0.91, "metadata": {"text": "Core Java"}},
                {"id": "java-dev-4", "score": 0.42}
            ],
            "namespace": "",
            "usage": {"readUnits": 5}
        }"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.matches.len(), 2);
        assert_eq!(response.matches[0].text(), Some("Core Java"));
        assert!(response.matches[1].text().is_none());
    }

    #[test]
    fn test_api_error_message_variants() {
        let not_found = r#"{"error": {"code": "NOT_FOUND", "message": "Index not found"}}"#;
        assert_eq!(api_error_message(not_found.to_string()), "Index not found");

        let bad_dimension = r#"{"code": 3, "message": "Vector dimension 3 does not match"}"#;
        assert_eq!(
            api_error_message(bad_dimension.to_string()),
            "Vector dimension 3 does not match"
        );
        assert_eq!(api_error_message("upstream timeout".to_string()), "upstream timeout");
    }
}
