//! OpenAI-style chat completion provider.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AiConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::types::MetadataPayload;

const SYSTEM_PROMPT: &str = "You are a social media analyst. Respond with a single JSON object \
of the form {\"viral_score\": <integer 0-100>, \"description\": <string>} and nothing else.";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Request clip metadata from the chat completion endpoint.
///
/// One attempt, no retry: any failure advances the provider chain.
pub(crate) async fn request_metadata(
    client: &Client,
    config: &AiConfig,
    api_key: &str,
    filename: &str,
) -> ProviderResult<MetadataPayload> {
    let url = format!(
        "{}/v1/chat/completions",
        config.openai_base_url.trim_end_matches('/')
    );

    let request = ChatRequest {
        model: config.openai_model.clone(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: format!(
                    "Estimate the viral potential of a 15-second clip cut from the start of the \
                     video file \"{filename}\" and write an engaging caption for it."
                ),
            },
        ],
        response_format: ResponseFormat {
            format_type: "json_object",
        },
    };

    debug!("Requesting clip metadata from {}", url);

    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .json(&request)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::status(status, body));
    }

    let chat: ChatResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::malformed(e.to_string()))?;

    let content = chat
        .choices
        .first()
        .map(|c| c.message.content.as_str())
        .ok_or(ProviderError::EmptyResponse)?;

    serde_json::from_str(content).map_err(|e| ProviderError::malformed(e.to_string()))
}
