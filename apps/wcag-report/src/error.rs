//! Errors raised while loading inputs around the pipeline.
//!
//! The pipeline itself is total; only reading files, parsing audit JSON,
//! loading guidance tables and expanding globs can fail.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a valid audit result: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid guidance file {}: {message}", path.display())]
    Guidance { path: PathBuf, message: String },
    #[error("bad glob pattern: {0}")]
    Pattern(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
