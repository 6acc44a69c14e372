//! Multi-provider fallback orchestration.
//!
//! Routes a generation request through an ordered list of provider
//! identifiers. Providers are tried strictly one after another; the first
//! success wins and nothing after it is invoked. Every failed attempt is
//! classified, logged and kept so an exhausted chain can report all of them.

use std::sync::Arc;

use tracing::Instrument;

use cherokee_types::config::DEFAULT_PROVIDER_ID;
use cherokee_types::llm::{
    AggregateFailure, GenerateError, GenerationResult, GenerationSettings, ProviderFailure,
};

use super::classify::classify;
use super::registry::ProviderRegistry;

/// Routes generation requests through providers with ordered fallback.
///
/// Holds no mutable state: the registry is shared read-only and the default
/// order is fixed at construction, so one manager can serve concurrent
/// requests behind an `Arc`.
#[derive(Debug)]
pub struct LlmManager {
    registry: Arc<ProviderRegistry>,
    default_order: Vec<String>,
}

impl LlmManager {
    /// Create a manager with an explicit default order.
    ///
    /// Entries are trimmed and blank entries dropped. Duplicates are kept. If
    /// nothing remains, the order falls back to `["openai-gpt4o"]`.
    pub fn new(registry: Arc<ProviderRegistry>, default_order: Vec<String>) -> Self {
        let mut order: Vec<String> = default_order
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        if order.is_empty() {
            tracing::warn!(
                default = DEFAULT_PROVIDER_ID,
                "Empty provider order, using default"
            );
            order.push(DEFAULT_PROVIDER_ID.to_string());
        }

        Self {
            registry,
            default_order: order,
        }
    }

    /// Create a manager whose default order is the single default provider.
    pub fn with_default_order(registry: Arc<ProviderRegistry>) -> Self {
        Self::new(registry, vec![DEFAULT_PROVIDER_ID.to_string()])
    }

    pub fn default_order(&self) -> &[String] {
        &self.default_order
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Generate text through the fallback chain.
    ///
    /// Uses `order_override` when it is given and non-empty, the default order
    /// otherwise. A one-entry order that fails returns
    /// [`GenerateError::Provider`]; a longer order that fails everywhere returns
    /// [`GenerateError::Exhausted`] with one failure per entry, in order.
    pub async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
        order_override: Option<&[String]>,
    ) -> Result<GenerationResult, GenerateError> {
        let order = match order_override {
            Some(order) if !order.is_empty() => order,
            _ => self.default_order.as_slice(),
        };
        if order.is_empty() {
            return Err(GenerateError::NoProviders);
        }

        let mut failures = Vec::with_capacity(order.len());

        for (index, id) in order.iter().enumerate() {
            let span = tracing::info_span!("llm_attempt", provider = %id, attempt = index + 1);

            match self.attempt(id, prompt, settings).instrument(span).await {
                Ok(text) => {
                    if index > 0 {
                        tracing::info!(provider = %id, skipped = index, "Fallback provider succeeded");
                    }
                    return Ok(GenerationResult {
                        provider: id.clone(),
                        text,
                    });
                }
                Err(failure) => failures.push(failure),
            }
        }

        if failures.len() == 1 {
            let failure = failures.remove(0);
            return Err(GenerateError::Provider(failure));
        }

        tracing::warn!(attempts = failures.len(), "All providers in fallback chain failed");
        Err(AggregateFailure::new(failures)
            .map_or(GenerateError::NoProviders, GenerateError::Exhausted))
    }

    /// Run one provider attempt, turning every failure into a [`ProviderFailure`].
    async fn attempt(
        &self,
        id: &str,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, ProviderFailure> {
        let Some(provider) = self.registry.resolve(id) else {
            tracing::error!(provider = %id, "Provider not configured");
            return Err(ProviderFailure::unknown_provider(id));
        };

        provider.generate(prompt, settings).await.map_err(|err| {
            let code = classify(&err);
            tracing::error!(
                provider = %id,
                backend = provider.name(),
                code = %code,
                error = %err,
                "Provider call failed"
            );
            ProviderFailure::new(code, id, err.to_string())
        })
    }
}
