//! In-memory `VectorStore` used by tests. Records every upsert batch so tests
//! can assert on batching.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{QueryMatch, VectorRecord, VectorStore, VectorStoreError};

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<VectorRecord>>,
    batches: Mutex<Vec<Vec<String>>>,
    /// Zero-based batch index at which `upsert` starts failing.
    fail_from_batch: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_from(batch: usize) -> Self {
        Self {
            fail_from_batch: Some(batch),
            ..Self::default()
        }
    }

    /// Ids of every upsert call, in call order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<VectorRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<usize, VectorStoreError> {
        let mut batches = self.batches.lock().unwrap();
        if self.fail_from_batch.is_some_and(|n| batches.len() >= n) {
            batches.push(Vec::new());
            return Err(VectorStoreError::Api {
                status: 500,
                message: "simulated upsert failure".to_string(),
            });
        }
        batches.push(records.iter().map(|r| r.id.clone()).collect());

        let count = records.len();
        let mut stored = self.records.lock().unwrap();
        for record in records {
            match stored.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => stored.push(record),
            }
        }
        Ok(count)
    }

    async fn delete_all(&self) -> Result<(), VectorStoreError> {
        self.records.lock().unwrap().clear();
        Ok(())
    }

    async fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<QueryMatch>, VectorStoreError> {
        let stored = self.records.lock().unwrap();
        let mut matches: Vec<QueryMatch> = stored
            .iter()
            .map(|r| QueryMatch {
                id: r.id.clone(),
                score: cosine(&vector, &r.values),
                metadata: r.metadata.clone(),
            })
            .collect();
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }
}
