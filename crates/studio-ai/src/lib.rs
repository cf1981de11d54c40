//! AI metadata enrichment.
//!
//! Produces a virality score and caption for a generated clip. Providers
//! are tried in a fixed order — an OpenAI-style chat endpoint, then a
//! Gemini-style generation endpoint, then a local heuristic — and the
//! chain short-circuits on the first usable answer. The heuristic never
//! fails, so enrichment as a whole never fails.

pub mod config;
pub mod enricher;
pub mod error;
mod gemini;
mod openai;
pub mod types;

pub use config::AiConfig;
pub use enricher::MetadataEnricher;
pub use error::{ProviderError, ProviderResult};
pub use types::AiMetadata;
