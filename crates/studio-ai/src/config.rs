//! Enricher configuration.

/// Credentials and endpoints for the metadata providers.
///
/// Passed explicitly into the enricher; a provider with no API key is
/// skipped without a network round trip. Keys are checked on every call
/// — there is deliberately no circuit breaker or health cache.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// OpenAI-style provider credential; `None` disables the provider.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,

    /// Gemini-style provider credential; `None` disables the provider.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,

    /// Uniform request timeout applied to both providers, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: "https://api.openai.com".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            gemini_api_key: None,
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            request_timeout_secs: 90,
        }
    }
}

impl AiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            request_timeout_secs: std::env::var("AI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Config with every remote provider disabled.
    pub fn disabled() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_credentials() {
        let config = AiConfig::default();
        assert!(config.openai_api_key.is_none());
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.request_timeout_secs, 90);
    }
}
