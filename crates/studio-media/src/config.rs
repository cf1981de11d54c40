//! External tool configuration.

/// Paths and limits for the external tools the pipelines may invoke.
///
/// Passed explicitly into pipeline constructors; there is no ambient
/// global lookup, which keeps the subprocess layer swappable in tests.
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// FFmpeg binary name or path.
    pub ffmpeg_bin: String,
    /// AI matting tool binary name or path.
    pub matting_bin: String,
    /// Timeout applied to every tool subprocess, in seconds.
    ///
    /// Expiry is treated like any other tool failure and triggers the
    /// caller's fallback.
    pub tool_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
            matting_bin: "rembg".to_string(),
            tool_timeout_secs: 30,
        }
    }
}

impl ToolsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            ffmpeg_bin: std::env::var("FFMPEG_BIN").unwrap_or_else(|_| "ffmpeg".to_string()),
            matting_bin: std::env::var("MATTING_BIN").unwrap_or_else(|_| "rembg".to_string()),
            tool_timeout_secs: std::env::var("TOOL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolsConfig::default();
        assert_eq!(config.ffmpeg_bin, "ffmpeg");
        assert_eq!(config.matting_bin, "rembg");
        assert_eq!(config.tool_timeout_secs, 30);
    }
}
