//! LLM provider implementations.
//!
//! Contains the two concrete [`LlmProvider`](cherokee_core::llm::provider::LlmProvider)
//! variants: the hosted chat-completion API ([`openai_compat`]) and the
//! generic JSON-over-HTTP endpoint ([`http`]).
//!
//! Also provides the factory that turns resolved configuration into a
//! populated [`ProviderRegistry`] and a ready [`LlmManager`].

pub mod http;
pub mod openai_compat;

use std::sync::Arc;

use cherokee_core::llm::box_provider::BoxLlmProvider;
use cherokee_core::llm::fallback::LlmManager;
use cherokee_core::llm::registry::ProviderRegistry;
use cherokee_types::config::{LlmConfig, ProviderConfig, ProviderKind};
use cherokee_types::llm::LlmError;

use crate::config::{effective_providers, resolve_api_key, resolve_endpoint, resolve_provider_order};

use self::http::HttpProvider;
use self::openai_compat::OpenAiProvider;
use self::openai_compat::config::{DEFAULT_MODEL, OpenAiCompatConfig};

const PLACEHOLDER_PREFIX: &str = "# Generated code placeholder for: ";

/// Stand-in text returned by providers that cannot reach a real backend.
pub fn placeholder_text(prompt: &str) -> String {
    format!("{PLACEHOLDER_PREFIX}{prompt}")
}

/// Map a `reqwest` error onto an [`LlmError`], keeping the HTTP status if any.
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout(err.to_string())
    } else if let Some(status) = err.status() {
        LlmError::Api {
            status: Some(status.as_u16()),
            code: None,
            kind: None,
            message: err.to_string(),
        }
    } else if err.is_connect() || err.is_request() {
        LlmError::Connection(err.to_string())
    } else if err.is_decode() {
        LlmError::Deserialization(err.to_string())
    } else {
        LlmError::Other(err.to_string())
    }
}

/// Create a [`BoxLlmProvider`] from a [`ProviderConfig`].
///
/// Endpoints and API keys are resolved through `lookup`. A hosted provider
/// without a key, or an HTTP provider without an endpoint, is still built;
/// it answers with placeholder text.
pub fn create_provider<L>(config: &ProviderConfig, client: &reqwest::Client, lookup: &L) -> BoxLlmProvider
where
    L: Fn(&str) -> Option<String>,
{
    match config.kind {
        ProviderKind::HostedApi => {
            let provider = OpenAiProvider::new(
                client.clone(),
                OpenAiCompatConfig {
                    base_url: resolve_endpoint(config, lookup),
                    api_key: resolve_api_key(config, lookup),
                    default_model: config
                        .default_model
                        .clone()
                        .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                },
            );
            if !provider.is_configured() {
                tracing::info!(provider = %config.id, "No API key set, provider will return placeholders");
            }
            BoxLlmProvider::new(provider)
        }
        ProviderKind::Http => {
            let provider = HttpProvider::new(client.clone(), resolve_endpoint(config, lookup));
            BoxLlmProvider::new(provider)
        }
    }
}

/// Register one provider per config entry. Later entries with a repeated id win.
pub fn build_registry<L>(providers: &[ProviderConfig], lookup: &L) -> ProviderRegistry
where
    L: Fn(&str) -> Option<String>,
{
    let client = reqwest::Client::new();
    let mut registry = ProviderRegistry::new();
    for config in providers {
        registry.register(config.id.clone(), create_provider(config, &client, lookup));
    }
    registry
}

/// Build the fallback manager for a loaded configuration.
///
/// `explicit_order` (e.g. from the CLI) takes precedence over
/// `LLM_PROVIDER_ORDER`, which takes precedence over the file.
pub fn build_manager<L>(config: &LlmConfig, explicit_order: Option<Vec<String>>, lookup: &L) -> LlmManager
where
    L: Fn(&str) -> Option<String>,
{
    let registry = build_registry(&effective_providers(config), lookup);
    let order = explicit_order
        .filter(|order| !order.is_empty())
        .unwrap_or_else(|| resolve_provider_order(config, lookup));

    tracing::info!(
        providers = registry.len(),
        order = %order.join(","),
        "LLM providers registered"
    );

    LlmManager::new(Arc::new(registry), order)
}
