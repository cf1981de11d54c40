//! Thumbnail generation.

use std::path::Path;

use crate::command::{FfmpegCommand, ToolRunner};
use crate::error::MediaResult;

/// Width of generated thumbnails; height follows the aspect ratio.
const THUMBNAIL_SCALE_WIDTH: u32 = 480;
/// Frame position sampled for the thumbnail.
const THUMBNAIL_TIMESTAMP: &str = "00:00:01";

/// Generate a JPEG thumbnail from a video file.
pub async fn generate_thumbnail(
    runner: &ToolRunner,
    ffmpeg_bin: &str,
    video_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let video_path = video_path.as_ref();
    let output_path = output_path.as_ref();

    let filter = format!("scale={THUMBNAIL_SCALE_WIDTH}:-2");

    let cmd = FfmpegCommand::new(video_path, output_path)
        .input_arg("-ss")
        .input_arg(THUMBNAIL_TIMESTAMP)
        .single_frame()
        .video_filter(&filter);

    runner.run_checked(ffmpeg_bin, &cmd.build_args()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_filter() {
        let filter = format!("scale={THUMBNAIL_SCALE_WIDTH}:-2");
        assert!(filter.contains("480"));
    }
}
