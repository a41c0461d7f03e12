//! Sequential scoring of resume files.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::api_client::AtsBackend;
use crate::pdf::ResumeReader;
use crate::ranking::{extract_score, ScoringResult};

/// Scores one resume text. A failed check still yields a result, without a score.
pub async fn score_resume(
    backend: &dyn AtsBackend,
    job_description: &str,
    filename: String,
    resume_text: &str,
) -> ScoringResult {
    match backend.ats_check(resume_text, job_description).await {
        Ok(output) => {
            let score = extract_score(&output);
            info!(file = %filename, ?score, "Resume scored");
            ScoringResult {
                filename,
                score,
                output,
            }
        }
        Err(e) => {
            error!(file = %filename, "Error fetching ATS check: {e}");
            ScoringResult {
                filename,
                score: None,
                output: format!("Error occurred during ATS check: {e}"),
            }
        }
    }
}

/// Extracts and scores each file in turn, awaiting every check before the next.
///
/// Files whose text cannot be extracted are reported and skipped.
pub async fn score_resumes(
    backend: &dyn AtsBackend,
    reader: &dyn ResumeReader,
    job_description: &str,
    paths: &[PathBuf],
) -> Vec<ScoringResult> {
    let mut results = Vec::with_capacity(paths.len());

    for path in paths {
        let resume_text = match reader.read_text(path).await {
            Ok(text) => text,
            Err(e) => {
                error!("Skipping resume: {e}");
                continue;
            }
        };

        let result = score_resume(backend, job_description, display_name(path), &resume_text).await;
        results.push(result);
    }

    results
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
