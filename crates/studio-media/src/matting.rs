//! AI matting tool invocation.
//!
//! The matting tool is an opaque external capability: it takes an input
//! image path and an output path, and either produces a cut-out or it
//! doesn't. Nothing about its internals is assumed here.

use std::path::Path;

use tracing::info;

use crate::command::ToolRunner;
use crate::error::{MediaError, MediaResult};

/// Run the AI matting tool on an image.
///
/// Success requires BOTH a zero exit code and the output file actually
/// existing afterwards; some tool versions exit 0 on inputs they silently
/// refuse to process.
pub async fn invoke_matting_tool(
    runner: &ToolRunner,
    matting_bin: &str,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        "Invoking matting tool: {} {} -> {}",
        matting_bin,
        input.display(),
        output.display()
    );

    let args = vec![
        "i".to_string(),
        input.to_string_lossy().to_string(),
        output.to_string_lossy().to_string(),
    ];

    runner.run_checked(matting_bin, &args).await?;

    if !output.exists() {
        return Err(MediaError::missing_output(matting_bin, output));
    }

    info!("Matting tool produced {}", output.display());
    Ok(())
}
