//! Clip extraction.

use std::path::Path;

use tracing::info;

use studio_models::ClipSpec;

use crate::command::{FfmpegCommand, ToolRunner};
use crate::error::MediaResult;

/// Video codec used for extracted clips.
const CLIP_VIDEO_CODEC: &str = "libx264";
/// Encoder preset; speed over size, clips are short.
const CLIP_PRESET: &str = "veryfast";
/// Constant rate factor for extracted clips.
const CLIP_CRF: u8 = 23;
/// Audio codec used for extracted clips.
const CLIP_AUDIO_CODEC: &str = "aac";
/// Audio bitrate for extracted clips.
const CLIP_AUDIO_BITRATE: &str = "128k";

/// Cut and re-encode a clip from a source video.
///
/// The cut window comes from `spec`; the output is always H.264/AAC in
/// an MP4 container regardless of the source format.
pub async fn extract_clip(
    runner: &ToolRunner,
    ffmpeg_bin: &str,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    spec: &ClipSpec,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        "Extracting clip: {} -> {} (start: {:.2}s, duration: {:.2}s)",
        input.display(),
        output.display(),
        spec.start_secs,
        spec.duration_secs
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(spec.start_secs)
        .duration(spec.duration_secs)
        .video_codec(CLIP_VIDEO_CODEC)
        .preset(CLIP_PRESET)
        .crf(CLIP_CRF)
        .audio_codec(CLIP_AUDIO_CODEC)
        .audio_bitrate(CLIP_AUDIO_BITRATE);

    runner.run_checked(ffmpeg_bin, &cmd.build_args()).await?;

    info!("Clip extracted: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_command_shape() {
        let spec = ClipSpec::default();
        let cmd = FfmpegCommand::new("in.mp4", "out.mp4")
            .seek(spec.start_secs)
            .duration(spec.duration_secs)
            .video_codec(CLIP_VIDEO_CODEC)
            .preset(CLIP_PRESET)
            .crf(CLIP_CRF)
            .audio_codec(CLIP_AUDIO_CODEC)
            .audio_bitrate(CLIP_AUDIO_BITRATE);

        let args = cmd.build_args();
        assert!(args.contains(&"0.000".to_string()));
        assert!(args.contains(&"15.000".to_string()));
        assert!(args.contains(&"aac".to_string()));
        assert!(args.contains(&"128k".to_string()));
    }
}
