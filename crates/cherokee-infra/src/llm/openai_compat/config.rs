//! Configuration and defaults for the hosted chat-completion provider.

use std::time::Duration;

use secrecy::SecretString;

/// Model used when neither the settings nor the provider config name one.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Sampling temperature used when the settings omit `temperature`.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Output cap used when the settings omit `maxTokens`.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Per-request timeout for chat completion calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for an [`super::OpenAiProvider`].
///
/// `api_key` is `None` when the key variable is unset; the provider then
/// runs offline and answers with placeholder text.
pub struct OpenAiCompatConfig {
    /// Base URL override. `None` keeps the client's default (`https://api.openai.com/v1`).
    pub base_url: Option<String>,
    pub api_key: Option<SecretString>,
    /// Model identifier (e.g., "gpt-4o").
    pub default_model: String,
}

/// OpenAI defaults for a given key.
pub fn openai_defaults(api_key: Option<SecretString>) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        base_url: None,
        api_key,
        default_model: DEFAULT_MODEL.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_defaults_use_gpt4o() {
        let config = openai_defaults(None);
        assert_eq!(config.default_model, "gpt-4o");
        assert!(config.base_url.is_none());
        assert!(config.api_key.is_none());
    }
}
