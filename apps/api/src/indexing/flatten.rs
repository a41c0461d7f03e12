//! Flattening — turns job description files into a flat list of index items.
//!
//! Each input file holds a JSON array of jobs; every recommendation of every
//! job becomes one `IndexItem`. A single counter runs across all files so ids
//! never collide within one run.
//!
//! Recommendations are re-encoded in the spaced, ASCII-escaped form
//! (`{"name": "Caf\u00e9"}`) that the indexed corpus was built with, so the
//! stored text and its `content_hash` stay comparable across re-indexing.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::Value;
use thiserror::Error;

/// Page number stamped on every item; job files have no pagination.
pub const DEFAULT_PAGE_NUMBER: &str = "1";

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid job data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One job as stored in a job description file. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    pub slug: Option<String>,
    /// Opaque recommendation objects, indexed verbatim.
    #[serde(default)]
    pub recommendations: Vec<Value>,
}

/// A single indexable unit derived from one recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexItem {
    pub id: String,
    /// JSON-encoded recommendation.
    pub line: String,
    pub filename: String,
    #[serde(default = "default_page_number")]
    pub page_number: String,
}

fn default_page_number() -> String {
    DEFAULT_PAGE_NUMBER.to_string()
}

/// Reads every file in order and flattens its jobs into index items.
///
/// Fails on the first missing or malformed file.
pub fn prepare_job_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<IndexItem>, FlattenError> {
    let mut items = Vec::new();
    let mut counter = 0_usize;

    for path in paths {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| FlattenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let jobs: Vec<JobRecord> =
            serde_json::from_str(&raw).map_err(|source| FlattenError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        flatten_jobs(&jobs, &filename, &mut counter, &mut items).map_err(|source| {
            FlattenError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
    }

    Ok(items)
}

/// Appends one item per recommendation, advancing the shared `counter`.
///
/// A job without a slug is named after the counter value at the moment the
/// job is reached, so `job-3` may own items `job-3-3`, `job-3-4`, ...
pub fn flatten_jobs(
    jobs: &[JobRecord],
    filename: &str,
    counter: &mut usize,
    items: &mut Vec<IndexItem>,
) -> Result<(), serde_json::Error> {
    for job in jobs {
        let slug = job
            .slug
            .clone()
            .unwrap_or_else(|| format!("job-{counter}"));

        for rec in &job.recommendations {
            items.push(IndexItem {
                id: format!("{slug}-{counter}"),
                line: encode_line(rec)?,
                filename: filename.to_string(),
                page_number: default_page_number(),
            });
            *counter += 1;
        }
    }

    Ok(())
}

/// Encodes `value` with `", "` / `": "` separators and every non-ASCII
/// character escaped as `\uXXXX` (UTF-16 surrogate pairs above U+FFFF).
pub fn encode_line(value: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedAsciiFormatter);
    value.serialize(&mut ser)?;
    // Every byte written is ASCII.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0_u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
