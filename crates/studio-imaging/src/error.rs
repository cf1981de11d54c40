//! Imaging error types.

use thiserror::Error;

/// Result type for imaging operations.
pub type ImagingResult<T> = Result<T, ImagingError>;

/// Errors that can occur in the deterministic removal path.
#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Could not encode output image: {0}")]
    Encode(String),
}

impl ImagingError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }
}
