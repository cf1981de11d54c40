//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while driving external tools.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool {tool} failed: {message}")]
    ToolFailed {
        tool: String,
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("Tool {tool} produced no output at {path}")]
    MissingOutput { tool: String, path: PathBuf },

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create a tool failure error.
    pub fn tool_failed(
        tool: impl Into<String>,
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    pub fn missing_output(tool: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingOutput {
            tool: tool.into(),
            path: path.into(),
        }
    }
}
