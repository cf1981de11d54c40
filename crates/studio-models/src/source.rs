//! Media source resolution types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where a piece of input media comes from.
///
/// Remote sources are always materialized to a local file before any
/// processing happens; pipelines never operate on a network stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum MediaSource {
    /// A path on the local filesystem.
    Local(PathBuf),
    /// An HTTP(S) URL to fetch.
    Remote(String),
}

impl MediaSource {
    /// Classify a raw request string as a local path or remote URL.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            MediaSource::Remote(trimmed.to_string())
        } else {
            MediaSource::Local(PathBuf::from(trimmed))
        }
    }

    /// The file name this source refers to, used for naming derived
    /// artifacts and for filename-based metadata enrichment.
    ///
    /// For URLs this is the last path segment with any query string
    /// removed; falls back to `"source"` when nothing usable remains.
    pub fn file_name(&self) -> String {
        match self {
            MediaSource::Local(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "source".to_string()),
            MediaSource::Remote(url) => {
                let without_query = url.split(['?', '#']).next().unwrap_or(url);
                let segment = without_query.rsplit('/').next().unwrap_or("");
                if segment.is_empty() {
                    "source".to_string()
                } else {
                    segment.to_string()
                }
            }
        }
    }

    /// File extension of the source, if any.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name();
        Path::new(&name)
            .extension()
            .map(|e| e.to_string_lossy().to_string())
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, MediaSource::Remote(_))
    }
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaSource::Local(path) => write!(f, "{}", path.display()),
            MediaSource::Remote(url) => write!(f, "{url}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote() {
        let source = MediaSource::parse("https://cdn.example.com/media/video.mp4");
        assert!(source.is_remote());
        assert_eq!(source.file_name(), "video.mp4");
    }

    #[test]
    fn test_parse_local() {
        let source = MediaSource::parse("/data/uploads/photo.jpg");
        assert!(!source.is_remote());
        assert_eq!(source.file_name(), "photo.jpg");
        assert_eq!(source.extension().as_deref(), Some("jpg"));
    }

    #[test]
    fn test_remote_file_name_strips_query() {
        let source = MediaSource::parse("https://example.com/a/b/clip.mov?token=abc#t=1");
        assert_eq!(source.file_name(), "clip.mov");
        assert_eq!(source.extension().as_deref(), Some("mov"));
    }

    #[test]
    fn test_file_name_fallback() {
        let source = MediaSource::parse("https://example.com/");
        assert_eq!(source.file_name(), "source");
        assert!(source.extension().is_none());
    }
}
