//! Batched upsert — embeds index items and pushes them to the vector store.

use serde_json::{json, Map};
use tracing::info;

use crate::embedding::Embedder;
use crate::errors::AppError;
use crate::indexing::flatten::IndexItem;
use crate::indexing::hash::generate_hash;
use crate::vector_store::{VectorRecord, VectorStore};

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Embeds every item, then upserts them in contiguous batches of `batch_size`.
///
/// All embeddings are computed before the first upsert. Batches go out one at
/// a time, in input order; the first failing batch aborts the rest. Returns
/// the input ids in order without inspecting the store's per-batch counts.
pub async fn upsert_documents(
    items: &[IndexItem],
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
    batch_size: usize,
) -> Result<Vec<String>, AppError> {
    if batch_size == 0 {
        return Err(AppError::Validation(
            "batch_size must be at least 1".to_string(),
        ));
    }
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<String> = items.iter().map(|item| item.line.clone()).collect();
    let embeddings = embedder.embed(texts).await?;

    let records: Vec<VectorRecord> = items
        .iter()
        .zip(embeddings)
        .map(|(item, values)| to_record(item, values))
        .collect();

    let total_batches = records.len().div_ceil(batch_size);
    for (i, batch) in records.chunks(batch_size).enumerate() {
        info!("Upserting batch {} of {}", i + 1, total_batches);
        store.upsert(batch.to_vec()).await?;
    }

    Ok(items.iter().map(|item| item.id.clone()).collect())
}

fn to_record(item: &IndexItem, values: Vec<f32>) -> VectorRecord {
    let mut metadata = Map::new();
    metadata.insert("text".to_string(), json!(item.line));
    metadata.insert("filename".to_string(), json!(item.filename));
    metadata.insert("page_number".to_string(), json!(item.page_number));
    metadata.insert("content_hash".to_string(), json!(generate_hash(&item.line)));

    VectorRecord {
        id: item.id.clone(),
        values,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fake_vector, FakeEmbedder};
    use crate::vector_store::memory::MemoryStore;

    fn items(n: usize) -> Vec<IndexItem> {
        (0..n)
            .map(|i| IndexItem {
                id: format!("java-developer-{i}"),
                line: format!("{{\"name\":\"Assessment {i}\"}}"),
                filename: "job_descriptions.json".to_string(),
                page_number: "1".to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_batch_count_is_ceil_n_over_batch_size() {
        let cases = [
            (0, 50, 0),
            (1, 50, 1),
            (50, 50, 1),
            (51, 50, 2),
            (7, 3, 3),
            (9, 1, 9),
        ];
        for (n, batch_size, expected) in cases {
            let embedder = FakeEmbedder::new();
            let store = MemoryStore::new();

            upsert_documents(&items(n), &embedder, &store, batch_size)
                .await
                .unwrap();

            assert_eq!(store.batches().len(), expected, "n={n} batch_size={batch_size}");
        }
    }

    #[tokio::test]
    async fn test_batches_cover_every_item_once_in_order() {
        let input = items(7);
        let embedder = FakeEmbedder::new();
        let store = MemoryStore::new();

        let ids = upsert_documents(&input, &embedder, &store, 3).await.unwrap();

        let batches = store.batches();
        assert_eq!(batches.iter().map(Vec::len).collect::<Vec<_>>(), vec![3, 3, 1]);
        let flattened: Vec<String> = batches.into_iter().flatten().collect();
        let expected: Vec<String> = input.iter().map(|i| i.id.clone()).collect();
        assert_eq!(flattened, expected);
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_embeddings_computed_once_for_full_input() {
        let embedder = FakeEmbedder::new();
        let store = MemoryStore::new();

        upsert_documents(&items(120), &embedder, &store, 50)
            .await
            .unwrap();

        assert_eq!(embedder.calls(), 1);
        assert_eq!(store.batches().len(), 3);
    }

    #[tokio::test]
    async fn test_record_carries_text_and_hash() {
        let input = items(1);
        let embedder = FakeEmbedder::new();
        let store = MemoryStore::new();

        upsert_documents(&input, &embedder, &store, DEFAULT_BATCH_SIZE)
            .await
            .unwrap();

        let record = store.get("java-developer-0").unwrap();
        assert_eq!(record.values, fake_vector(&input[0].line));
        assert_eq!(record.metadata["text"], json!(input[0].line));
        assert_eq!(record.metadata["filename"], json!("job_descriptions.json"));
        assert_eq!(
            record.metadata["content_hash"],
            json!(generate_hash(&input[0].line))
        );
    }

    #[tokio::test]
    async fn test_failing_batch_aborts_remaining_batches() {
        let embedder = FakeEmbedder::new();
        let store = MemoryStore::failing_from(1);

        let err = upsert_documents(&items(10), &embedder, &store, 3)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::VectorStore(_)));
        // first batch written, second attempted and failed, nothing after
        assert_eq!(store.batches().len(), 2);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_embedding_failure_skips_store() {
        let embedder = FakeEmbedder::failing();
        let store = MemoryStore::new();

        let err = upsert_documents(&items(4), &embedder, &store, 2)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Embedding(_)));
        assert!(store.batches().is_empty());
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_rejected() {
        let embedder = FakeEmbedder::new();
        let store = MemoryStore::new();

        let err = upsert_documents(&items(2), &embedder, &store, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reupsert_overwrites_existing_ids() {
        let embedder = FakeEmbedder::new();
        let store = MemoryStore::new();

        upsert_documents(&items(5), &embedder, &store, 2).await.unwrap();
        upsert_documents(&items(5), &embedder, &store, 2).await.unwrap();

        assert_eq!(store.len(), 5);
    }
}
