//! Startup indexer — indexes the bundled job description files once per process.
//!
//! Runs as a background task next to the HTTP server. Failures never reach a
//! caller; the supervisor logs them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::embedding::Embedder;
use crate::errors::AppError;
use crate::indexing::flatten::prepare_job_files;
use crate::indexing::upsert::{upsert_documents, DEFAULT_BATCH_SIZE};
use crate::vector_store::VectorStore;

/// Job files looked up in the data directory, indexed in this order.
pub const STARTUP_JOB_FILES: [&str; 2] = ["job_descriptions.json", "job_descriptions_1.json"];

/// What the startup indexer did.
#[derive(Debug, PartialEq)]
pub enum StartupOutcome {
    /// None of the job files were present.
    NoJobFiles,
    Indexed { files: usize, ids: Vec<String> },
}

/// Existing startup job files under `dir`, in index order.
pub fn existing_job_files(dir: &Path) -> Vec<PathBuf> {
    STARTUP_JOB_FILES
        .iter()
        .map(|name| dir.join(name))
        .filter(|path| {
            let exists = path.is_file();
            if !exists {
                warn!(path = %path.display(), "Job description file not found, skipping");
            }
            exists
        })
        .collect()
}

/// Flattens and upserts every startup job file found in `dir`.
///
/// The files are read and parsed on the blocking pool.
pub async fn index_job_files(
    dir: &Path,
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
) -> Result<StartupOutcome, AppError> {
    let files = existing_job_files(dir);
    if files.is_empty() {
        return Ok(StartupOutcome::NoJobFiles);
    }

    let file_count = files.len();
    info!(files = file_count, "Indexing job description files");
    let items = tokio::task::spawn_blocking(move || prepare_job_files(files.as_slice()))
        .await
        .map_err(anyhow::Error::from)??;
    let ids = upsert_documents(&items, embedder, store, DEFAULT_BATCH_SIZE).await?;

    Ok(StartupOutcome::Indexed {
        files: file_count,
        ids,
    })
}

/// Spawns the startup indexer plus a supervisor that reports how it ended.
///
/// The returned handle resolves once the supervisor has logged the outcome.
pub fn spawn_startup_indexing(
    dir: PathBuf,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
) -> JoinHandle<()> {
    let job = tokio::spawn(async move {
        index_job_files(&dir, embedder.as_ref(), store.as_ref()).await
    });

    tokio::spawn(async move {
        match job.await {
            Ok(Ok(StartupOutcome::Indexed { files, ids })) => {
                info!(files, count = ids.len(), "Job data indexed");
            }
            Ok(Ok(StartupOutcome::NoJobFiles)) => {
                warn!("No job description files found, startup indexing skipped");
            }
            Ok(Err(e)) => {
                error!("Startup indexing failed: {e}");
            }
            Err(e) => {
                error!("Startup indexing task aborted: {e}");
            }
        }
    })
}
