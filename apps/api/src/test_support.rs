//! Deterministic doubles for the external collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::embedding::{Embedder, EmbeddingError};
use crate::llm_client::{LlmError, TextGenerator};
use crate::state::AppState;
use crate::vector_store::memory::MemoryStore;

pub const TEST_DIMENSIONS: usize = 8;

/// Bag-of-bytes embedding: identical texts map to identical vectors.
pub struct FakeEmbedder {
    calls: Mutex<usize>,
    fail: bool,
}

impl FakeEmbedder {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

pub fn fake_vector(text: &str) -> Vec<f32> {
    let mut v = vec![0.0_f32; TEST_DIMENSIONS];
    for (i, b) in text.bytes().enumerate() {
        v[(b as usize + i) % TEST_DIMENSIONS] += 1.0;
    }
    v
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(EmbeddingError::Encode("model unavailable".to_string()));
        }
        Ok(texts.iter().map(|t| fake_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        TEST_DIMENSIONS
    }
}

/// Returns a canned reply and remembers the prompts it was given.
pub struct FakeGenerator {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(LlmError::Api {
                status: 400,
                message: message.clone(),
            }),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        gemini_api_key: "test-gemini".to_string(),
        pinecone_api_key: "test-pinecone".to_string(),
        pinecone_index: "shlrag".to_string(),
        pinecone_index_host: Some("http://localhost:5081".to_string()),
        pinecone_namespace: String::new(),
        job_data_dir: ".".into(),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(
    embedder: Arc<FakeEmbedder>,
    store: Arc<MemoryStore>,
    generator: Arc<FakeGenerator>,
) -> AppState {
    AppState {
        embedder,
        store,
        llm: generator,
        config: test_config(),
    }
}
