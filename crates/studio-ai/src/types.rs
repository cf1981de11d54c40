//! Enrichment result types.

use serde::{Deserialize, Serialize};

/// AI-generated metadata for a clip. Always fully populated; fallback
/// paths fill in whatever a provider left out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiMetadata {
    /// Virality score in 0..=100.
    pub viral_score: u8,

    /// Caption suitable for social media.
    pub description: String,
}

/// Raw payload both providers are instructed to return. Either field may
/// be missing — partial success is still success.
#[derive(Debug, Deserialize)]
pub(crate) struct MetadataPayload {
    pub viral_score: Option<i64>,
    pub description: Option<String>,
}
