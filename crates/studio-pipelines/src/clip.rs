//! Clip generation pipeline.
//!
//! Probes the transcoder, enriches metadata from the source file name,
//! then either cuts a fixed-window clip or copies the source verbatim.
//! Transcoder absence and transcode failure are degraded successes, not
//! errors.

use reqwest::Client;
use tracing::{info, warn};

use studio_ai::{AiConfig, MetadataEnricher};
use studio_media::{
    copy_file, extract_clip, generate_thumbnail, probe_tool, ToolRunner, ToolsConfig,
};
use studio_models::{ClipEntry, ClipSpec, MediaSource, ProcessingResult};
use studio_storage::{unique_file_name, LocalStore};

use crate::error::{PipelineError, PipelineResult};
use crate::source::resolve_source;

/// Directory (under the store root) generated clips land in.
const CLIPS_DIR: &str = "clips";

/// Generates one short clip from a source video, enriched with AI
/// metadata.
pub struct ClipGenerationPipeline {
    store: LocalStore,
    tools: ToolsConfig,
    runner: ToolRunner,
    http: Client,
    enricher: MetadataEnricher,
    spec: ClipSpec,
}

impl ClipGenerationPipeline {
    pub fn new(store: LocalStore, tools: ToolsConfig, ai: AiConfig, http: Client) -> Self {
        let runner = ToolRunner::new().with_timeout(tools.tool_timeout_secs);
        Self {
            store,
            tools,
            runner,
            http,
            enricher: MetadataEnricher::new(ai),
            spec: ClipSpec::default(),
        }
    }

    /// Generate a clip from `source`.
    ///
    /// Always returns a result; failures are encoded in its `status`.
    pub async fn generate_clip(&self, source: MediaSource) -> ProcessingResult {
        match self.run(&source).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Clip generation failed for {}: {}", source, e);
                error_result(e)
            }
        }
    }

    async fn run(&self, source: &MediaSource) -> PipelineResult<ProcessingResult> {
        let input_path = resolve_source(&self.http, &self.store, source).await?;

        // Availability is probed fresh on every invocation.
        let transcoder_available =
            probe_tool(&self.runner, &self.tools.ffmpeg_bin, "-version").await;

        // Metadata is filename-based and runs regardless of the
        // transcoder outcome.
        let metadata = self.enricher.enrich(&source.file_name()).await;

        self.store.make_directory(CLIPS_DIR).await?;
        let clip_key = format!("{CLIPS_DIR}/{}", unique_file_name("clip", Some("mp4")));
        let clip_path = self.store.path(&clip_key)?;

        let transcoded = if transcoder_available {
            match extract_clip(
                &self.runner,
                &self.tools.ffmpeg_bin,
                &input_path,
                &clip_path,
                &self.spec,
            )
            .await
            {
                Ok(()) => true,
                Err(e) => {
                    warn!("Transcode failed ({}), copying source verbatim", e);
                    copy_file(&input_path, &clip_path).await?;
                    false
                }
            }
        } else {
            info!("Transcoder unavailable, copying source verbatim");
            copy_file(&input_path, &clip_path).await?;
            false
        };

        if transcoded {
            // Thumbnails are a nicety; a failure here never degrades the
            // result below a real transcode.
            let thumb_path = clip_path.with_extension("jpg");
            if let Err(e) = generate_thumbnail(
                &self.runner,
                &self.tools.ffmpeg_bin,
                &clip_path,
                &thumb_path,
            )
            .await
            {
                warn!("Failed to generate thumbnail: {}", e);
            }
        }

        let message = if transcoded {
            "Clip generated."
        } else {
            "Clip generated (source copied without transcoding)."
        };

        let clip = ClipEntry {
            url: self
                .store
                .url(&clip_key)
                .unwrap_or_else(|_| clip_key.clone()),
            path: clip_path.to_string_lossy().to_string(),
            description: metadata.description,
            viral_score: metadata.viral_score,
        };

        Ok(ProcessingResult::ok(message).with_clips(vec![clip]))
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
        other => ProcessingResult::error(format!("Clip generation failed: {other}")),
    }
}
