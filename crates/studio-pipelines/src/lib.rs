//! Tiered media-transformation pipelines.
//!
//! Two tools share one execution model: attempt a high-quality external
//! capability first (AI matting subprocess, FFmpeg transcoder, remote
//! LLM), and on any failure fall back deterministically to a weaker but
//! always-available local strategy. Wherever structurally possible the
//! pipelines end in an artifact, not an error; only unresolvable inputs
//! and infrastructure faults fail a request.

pub mod background;
pub mod clip;
pub mod error;
mod source;

pub use background::BackgroundRemovalPipeline;
pub use clip::ClipGenerationPipeline;
pub use error::{PipelineError, PipelineResult};
