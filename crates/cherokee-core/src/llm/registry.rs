//! Provider registry for runtime provider lookup.
//!
//! A simple identifier-indexed registry of boxed providers, built once at
//! startup and shared read-only across requests.

use std::collections::HashMap;

use super::box_provider::BoxLlmProvider;

/// Registry of configured providers, indexed by identifier.
///
/// Lookups never fail loudly: an unknown identifier yields `None`, which the
/// fallback manager records as an `unknown_provider` attempt.
#[derive(Debug)]
pub struct ProviderRegistry {
    providers: HashMap<String, BoxLlmProvider>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider under the given identifier.
    ///
    /// If a provider with this identifier already exists, it is replaced.
    pub fn register(&mut self, id: impl Into<String>, provider: BoxLlmProvider) {
        self.providers.insert(id.into(), provider);
    }

    /// Look up a provider by identifier.
    pub fn resolve(&self, id: &str) -> Option<&BoxLlmProvider> {
        self.providers.get(id)
    }

    /// List all registered identifiers, sorted.
    pub fn list_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.providers.keys().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::LlmProvider;
    use cherokee_types::llm::{GenerationSettings, LlmError};

    struct Echo(&'static str);

    impl LlmProvider for Echo {
        fn name(&self) -> &str {
            self.0
        }

        async fn generate(
            &self,
            prompt: &str,
            _settings: &GenerationSettings,
        ) -> Result<String, LlmError> {
            Ok(prompt.to_string())
        }
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        let registry = ProviderRegistry::new();
        assert!(registry.resolve("custom").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = ProviderRegistry::new();
        registry.register("custom", BoxLlmProvider::new(Echo("first")));
        registry.register("custom", BoxLlmProvider::new(Echo("second")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("custom").unwrap().name(), "second");
    }

    #[test]
    fn test_list_ids_sorted() {
        let mut registry = ProviderRegistry::default();
        registry.register("llama3", BoxLlmProvider::new(Echo("http")));
        registry.register("custom", BoxLlmProvider::new(Echo("http")));
        registry.register("openai-gpt4o", BoxLlmProvider::new(Echo("openai")));

        assert_eq!(registry.list_ids(), vec!["custom", "llama3", "openai-gpt4o"]);
        assert!(registry.resolve("llama3").is_some());
    }

    #[tokio::test]
    async fn test_boxed_provider_delegates() {
        let provider = BoxLlmProvider::new(Echo("echo"));
        let text = provider
            .generate("buy dip", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, "buy dip");
    }
}
