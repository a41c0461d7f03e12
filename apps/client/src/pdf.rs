use std::path::Path;

use async_trait::async_trait;

use crate::errors::ClientError;

/// Source of resume text, one file at a time.
#[async_trait]
pub trait ResumeReader: Send + Sync {
    async fn read_text(&self, path: &Path) -> Result<String, ClientError>;
}

/// Reads resumes as PDF files.
pub struct PdfReader;

#[async_trait]
impl ResumeReader for PdfReader {
    async fn read_text(&self, path: &Path) -> Result<String, ClientError> {
        extract_resume_text(path).await
    }
}

/// Extracts the text of a resume PDF.
///
/// Parsing runs on the blocking pool; a parser panic surfaces as an error for
/// this file only.
pub async fn extract_resume_text(path: &Path) -> Result<String, ClientError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| ClientError::Pdf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let text = parsed.map_err(|message| ClientError::Pdf {
        path: path.to_path_buf(),
        message,
    })?;

    Ok(join_nonempty_lines(&text))
}

/// Drops blank lines left between pages by the extractor.
fn join_nonempty_lines(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
