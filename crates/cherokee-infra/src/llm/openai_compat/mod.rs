//! Hosted chat-completion provider.
//!
//! [`OpenAiProvider`] talks to OpenAI (or any API speaking the same chat
//! completions protocol, via a base URL override) using [`async_openai`]'s
//! config and chat types.
//! Unlike the generic HTTP provider, it propagates every failure so the
//! fallback chain can classify it and move on.

pub mod config;

use std::time::Duration;

use async_openai::config::{Config, OpenAIConfig};
use async_openai::error::WrappedError;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    CreateChatCompletionResponse,
};
use secrecy::ExposeSecret;

use cherokee_core::llm::provider::LlmProvider;
use cherokee_types::llm::{GenerationSettings, LlmError};

use self::config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, OpenAiCompatConfig, REQUEST_TIMEOUT};
use super::{map_reqwest_error, placeholder_text};

/// Provider for a hosted OpenAI-compatible chat completion API.
///
/// Requests go out once through the shared `reqwest::Client`; there is no
/// retry inside an attempt. [`OpenAIConfig`] supplies the URL and auth headers.
///
/// Does NOT derive Debug: the config holds the API key.
pub struct OpenAiProvider {
    http: reqwest::Client,
    /// `None` when no API key is configured.
    config: Option<OpenAIConfig>,
    default_model: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(http: reqwest::Client, config: OpenAiCompatConfig) -> Self {
        let openai_config = config.api_key.map(|key| {
            let openai_config = OpenAIConfig::new().with_api_key(key.expose_secret());
            match config.base_url.as_deref() {
                Some(base_url) => openai_config.with_api_base(base_url),
                None => openai_config,
            }
        });

        Self {
            http,
            config: openai_config,
            default_model: config.default_model,
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a key was configured. Offline providers answer with placeholder text.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Build the chat request: system message, then the prompt as the user message.
    ///
    /// The output cap goes in `max_tokens`, which OpenAI-compatible servers
    /// behind an endpoint override understand.
    #[allow(deprecated)]
    fn build_request(&self, prompt: &str, settings: &GenerationSettings) -> CreateChatCompletionRequest {
        let system = settings.system_prompt().unwrap_or_default();
        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(system.to_string()),
                name: None,
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
                name: None,
            }),
        ];

        CreateChatCompletionRequest {
            model: settings.model().unwrap_or(&self.default_model).to_string(),
            messages,
            max_tokens: Some(settings.max_tokens().unwrap_or(DEFAULT_MAX_TOKENS)),
            temperature: Some(
                settings
                    .temperature()
                    .map(|t| t as f32)
                    .unwrap_or(DEFAULT_TEMPERATURE),
            ),
            ..Default::default()
        }
    }

    async fn complete(
        &self,
        config: &OpenAIConfig,
        request: &CreateChatCompletionRequest,
    ) -> Result<CreateChatCompletionResponse, LlmError> {
        let response = self
            .http
            .post(config.url("/chat/completions"))
            .headers(config.headers())
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_slice(&body).map_err(|e| LlmError::Deserialization(e.to_string()))
    }
}

impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str, settings: &GenerationSettings) -> Result<String, LlmError> {
        let Some(config) = &self.config else {
            tracing::debug!("No API key configured, returning placeholder");
            return Ok(placeholder_text(prompt));
        };

        let request = self.build_request(prompt, settings);
        tracing::debug!(model = %request.model, "Sending chat completion request");

        let response = self.complete(config, &request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Other("response contained no choices".to_string()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

/// Map a non-2xx response onto [`LlmError::Api`].
///
/// The status is always kept. `code`, `type` and `message` come from the
/// `{"error": {...}}` envelope when the body has one; otherwise the raw body
/// is the message.
fn api_error(status: u16, body: &[u8]) -> LlmError {
    match serde_json::from_slice::<WrappedError>(body) {
        Ok(wrapped) => LlmError::Api {
            status: Some(status),
            code: wrapped.error.code,
            kind: wrapped.error.r#type,
            message: wrapped.error.message,
        },
        Err(_) => LlmError::Api {
            status: Some(status),
            code: None,
            kind: None,
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}
