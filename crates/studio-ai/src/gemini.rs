//! Gemini-style generation provider.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AiConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::types::MetadataPayload;

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

/// Request clip metadata from the generation endpoint.
///
/// One attempt, no retry: any failure advances the provider chain.
pub(crate) async fn request_metadata(
    client: &Client,
    config: &AiConfig,
    api_key: &str,
    filename: &str,
) -> ProviderResult<MetadataPayload> {
    let url = format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        config.gemini_base_url.trim_end_matches('/'),
        config.gemini_model,
        api_key
    );

    let prompt = format!(
        "A 15-second clip was cut from the start of the video file \"{filename}\". \
         Estimate its viral potential and write an engaging caption.\n\
         Return ONLY a single JSON object of the form \
         {{\"viral_score\": <integer 0-100>, \"description\": <string>}}. \
         Do not wrap the answer in markdown code fences."
    );

    let request = GeminiRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
        },
    };

    debug!("Requesting clip metadata from model {}", config.gemini_model);

    let response = client
        .post(&url)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::status(status, body));
    }

    let gemini: GeminiResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::malformed(e.to_string()))?;

    let text = gemini
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.as_str())
        .ok_or(ProviderError::EmptyResponse)?;

    // Models occasionally wrap JSON in markdown fences despite the prompt.
    let text = strip_code_fences(text);

    serde_json::from_str(text).map_err(|e| ProviderError::malformed(e.to_string()))
}

/// Strip markdown code fences from a model response.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let fenced = "```json\n{\"viral_score\": 90}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"viral_score\": 90}");
    }

    #[test]
    fn test_strip_bare_fence() {
        let fenced = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn test_unfenced_text_untouched() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }
}
