//! Error types for mapflat

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Mapflat error type
///
/// Every variant is terminal for a run: the tool is a build step, so nothing
/// here is retried or recovered from.
#[derive(Error, Debug)]
pub enum Error {
    /// Fewer bytes left in the blob than a section header or payload declares
    #[error("truncated input in section '{kind}': needed {needed} bytes, {available} available")]
    TruncatedInput {
        kind: String,
        needed: u64,
        available: u64,
    },
    /// Source document does not match the schema
    #[error("schema mismatch for '{kind}': {reason}")]
    SchemaMismatch { kind: String, reason: String },
    /// Malformed kind descriptors
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// File could not be opened, read or written
    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing to an in-memory or caller-provided stream failed
    #[error("write failed: {0}")]
    Write(#[from] io::Error),
    /// JSON syntax error in a document or schema file
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn mismatch(kind: &str, reason: impl Into<String>) -> Self {
        Error::SchemaMismatch {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
