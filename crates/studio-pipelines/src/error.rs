//! Pipeline error types.
//!
//! Only mandatory-stage failures live here: source resolution and fatal
//! write/encode errors. Failures of the optional quality-enhancing
//! stages (AI subprocess, transcoder, metadata providers) are absorbed
//! inside the pipelines and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] studio_storage::StorageError),

    #[error("Media error: {0}")]
    Media(#[from] studio_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed(message.into())
    }
}
