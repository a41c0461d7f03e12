use std::path::PathBuf;

use anyhow::{Context, Result};

/// Name of the Pinecone index used when `PINECONE_INDEX` is not set.
pub const DEFAULT_INDEX_NAME: &str = "shlrag";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub pinecone_api_key: String,
    pub pinecone_index: String,
    /// Data-plane host of the index. Resolved through the control plane when absent.
    pub pinecone_index_host: Option<String>,
    pub pinecone_namespace: String,
    /// Directory holding the job description files indexed at startup.
    pub job_data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            pinecone_api_key: require_env("PINECONE_API_KEY")?,
            pinecone_index: std::env::var("PINECONE_INDEX")
                .unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string()),
            pinecone_index_host: std::env::var("PINECONE_INDEX_HOST")
                .ok()
                .filter(|h| !h.trim().is_empty()),
            pinecone_namespace: std::env::var("PINECONE_NAMESPACE").unwrap_or_default(),
            job_data_dir: std::env::var("JOB_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
