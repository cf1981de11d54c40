//! Clip extraction parameters.

use serde::{Deserialize, Serialize};

/// The cut window applied when extracting a clip from a source video.
///
/// The window is a pipeline parameter, not a per-request input: every
/// generated short uses the same fixed slice of the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipSpec {
    /// Offset into the source, in seconds.
    pub start_secs: f64,

    /// Length of the clip, in seconds.
    pub duration_secs: f64,
}

impl Default for ClipSpec {
    fn default() -> Self {
        Self {
            start_secs: 0.0,
            duration_secs: 15.0,
        }
    }
}

impl ClipSpec {
    pub fn new(start_secs: f64, duration_secs: f64) -> Self {
        Self {
            start_secs,
            duration_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let spec = ClipSpec::default();
        assert!((spec.start_secs - 0.0).abs() < f64::EPSILON);
        assert!((spec.duration_secs - 15.0).abs() < f64::EPSILON);
    }
}
