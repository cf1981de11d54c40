//! Background removal pipeline.
//!
//! Fallback chain: AI matting subprocess -> deterministic color-distance
//! matting -> verbatim copy of the input. The only fatal outcomes are an
//! unresolvable source and unexpected infrastructure errors.

use std::path::Path;

use reqwest::Client;
use tracing::{info, warn};

use studio_media::{invoke_matting_tool, ToolRunner, ToolsConfig};
use studio_models::{MediaSource, ProcessingResult};
use studio_storage::LocalStore;

use crate::error::{PipelineError, PipelineResult};
use crate::source::resolve_source;

/// Directory (under the store root) cut-out images land in.
const OUTPUT_DIR: &str = "nobg";

/// Suffix appended to the input's base name for the output artifact.
const OUTPUT_SUFFIX: &str = "_nobg";

/// Removes the background from a still image, degrading gracefully from
/// the AI matting tool to the deterministic local algorithm.
pub struct BackgroundRemovalPipeline {
    store: LocalStore,
    tools: ToolsConfig,
    runner: ToolRunner,
    http: Client,
}

impl BackgroundRemovalPipeline {
    pub fn new(store: LocalStore, tools: ToolsConfig, http: Client) -> Self {
        let runner = ToolRunner::new().with_timeout(tools.tool_timeout_secs);
        Self {
            store,
            tools,
            runner,
            http,
        }
    }

    /// Remove the background from `source`.
    ///
    /// Always returns a result; failures are encoded in its `status`.
    pub async fn remove_background(&self, source: MediaSource) -> ProcessingResult {
        match self.run(&source).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Background removal failed for {}: {}", source, e);
                error_result(e)
            }
        }
    }

    async fn run(&self, source: &MediaSource) -> PipelineResult<ProcessingResult> {
        let input_path = resolve_source(&self.http, &self.store, source).await?;

        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let output_key = format!("{OUTPUT_DIR}/{stem}{OUTPUT_SUFFIX}.png");

        self.store.make_directory(OUTPUT_DIR).await?;
        let output_path = self.store.path(&output_key)?;

        // Tier 1: AI matting subprocess. Any failure falls through.
        match invoke_matting_tool(&self.runner, &self.tools.matting_bin, &input_path, &output_path)
            .await
        {
            Ok(()) => {
                info!("Background removed by AI matting tool");
                return Ok(self.artifact_result("Background removed.", &output_key, &output_path));
            }
            Err(e) => {
                warn!("AI matting tool unavailable, falling back: {}", e);
                // A failed tool run may have left a partial file behind.
                if output_path.exists() {
                    let _ = tokio::fs::remove_file(&output_path).await;
                }
            }
        }

        // Tier 2: deterministic color-distance matting.
        let input_bytes = tokio::fs::read(&input_path).await?;
        match studio_imaging::remove_background(&input_bytes) {
            Ok(png) => {
                self.store.put(&output_key, &png).await?;
                info!("Background removed by deterministic matting");
                Ok(self.artifact_result(
                    "Background removed (deterministic matting).",
                    &output_key,
                    &output_path,
                ))
            }
            Err(e) => {
                // Tier 3: not decodable as an image we know. Still produce
                // a file so the caller has something to work with.
                warn!("Input not decodable ({}), copying original bytes", e);
                self.store.put(&output_key, &input_bytes).await?;
                Ok(self.artifact_result(
                    "Background removal unavailable for this format; original image copied.",
                    &output_key,
                    &output_path,
                ))
            }
        }
    }

    fn artifact_result(
        &self,
        message: &str,
        output_key: &str,
        output_path: &Path,
    ) -> ProcessingResult {
        let url = self
            .store
            .url(output_key)
            .unwrap_or_else(|_| output_key.to_string());
        ProcessingResult::ok(message).with_artifact(url, output_path.to_string_lossy())
    }
}

fn error_result(e: PipelineError) -> ProcessingResult {
    match e {
        PipelineError::NotFound(path) => {
            ProcessingResult::error(format!("File not found: {}", path.display()))
        }
        PipelineError::FetchFailed(message) => {
            ProcessingResult::error(format!("Could not download source: {message}"))
        }
        _ => ProcessingResult::error("Processing failed"),
    }
}
