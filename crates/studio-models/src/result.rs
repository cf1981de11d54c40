//! Processing result models.
//!
//! These are the wire types handed back to the request layer; field names
//! are part of the JSON contract and must not change.

use serde::{Deserialize, Serialize};

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    #[default]
    Ok,
    Error,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Ok => "ok",
            ProcessingStatus::Error => "error",
        }
    }
}

/// A single generated clip with its AI metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipEntry {
    /// Public URL of the clip.
    pub url: String,

    /// Filesystem path of the clip.
    pub path: String,

    /// AI-generated caption.
    pub description: String,

    /// Virality score in 0..=100.
    pub viral_score: u8,
}

/// Result returned by a tool pipeline.
///
/// `status == Ok` guarantees that any artifact path in the result denotes
/// a persisted, readable file. `status == Error` guarantees no artifact
/// was produced by this run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub status: ProcessingStatus,

    /// Human-readable outcome; degraded successes are distinguished here,
    /// not in `status`.
    pub message: String,

    /// Public URL of the produced artifact (image tools).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Filesystem path of the produced artifact (image tools).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    /// Generated clips (video tools).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clips: Option<Vec<ClipEntry>>,
}

impl ProcessingResult {
    /// Successful result with no artifact fields yet.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: ProcessingStatus::Ok,
            message: message.into(),
            url: None,
            output_path: None,
            clips: None,
        }
    }

    /// Failed result. Never carries artifact fields.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ProcessingStatus::Error,
            message: message.into(),
            url: None,
            output_path: None,
            clips: None,
        }
    }

    /// Attach a produced artifact.
    pub fn with_artifact(mut self, url: impl Into<String>, path: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self.output_path = Some(path.into());
        self
    }

    /// Attach generated clips.
    pub fn with_clips(mut self, clips: Vec<ClipEntry>) -> Self {
        self.clips = Some(clips);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == ProcessingStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ProcessingStatus::Ok).unwrap();
        assert_eq!(json, "\"ok\"");
        let json = serde_json::to_string(&ProcessingStatus::Error).unwrap();
        assert_eq!(json, "\"error\"");
    }

    #[test]
    fn test_image_result_shape() {
        let result = ProcessingResult::ok("Background removed.")
            .with_artifact("http://localhost/outputs/a.png", "/srv/outputs/a.png");

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["url"], "http://localhost/outputs/a.png");
        assert_eq!(value["output_path"], "/srv/outputs/a.png");
        assert!(value.get("clips").is_none());
    }

    #[test]
    fn test_clip_result_shape() {
        let result = ProcessingResult::ok("Clip generated.").with_clips(vec![ClipEntry {
            url: "http://localhost/clips/c.mp4".to_string(),
            path: "/srv/clips/c.mp4".to_string(),
            description: "A caption".to_string(),
            viral_score: 91,
        }]);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["clips"][0]["viral_score"], 91);
        assert_eq!(value["clips"][0]["description"], "A caption");
        assert!(value.get("url").is_none());
    }

    #[test]
    fn test_error_has_no_artifacts() {
        let result = ProcessingResult::error("Processing failed");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value.get("url").is_none());
        assert!(value.get("output_path").is_none());
    }
}
