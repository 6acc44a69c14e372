//! Type-erased providers, so the registry can hold both variants (and test
//! doubles) in one map.
//!
//! `LlmProvider::generate` returns `impl Future`, which rules out `dyn
//! LlmProvider`. `LlmProviderDyn` boxes that future and is implemented for
//! every `LlmProvider`; `BoxLlmProvider` owns one and forwards to it.

use std::future::Future;
use std::pin::Pin;

use cherokee_types::llm::{GenerationSettings, LlmError};

use super::provider::LlmProvider;

/// [`LlmProvider`] with the generation future boxed.
pub trait LlmProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        prompt: &'a str,
        settings: &'a GenerationSettings,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;
}

impl<T: LlmProvider> LlmProviderDyn for T {
    fn name(&self) -> &str {
        LlmProvider::name(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        prompt: &'a str,
        settings: &'a GenerationSettings,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(prompt, settings))
    }
}

/// Owned, type-erased provider stored in the [`ProviderRegistry`](super::registry::ProviderRegistry).
pub struct BoxLlmProvider {
    inner: Box<dyn LlmProviderDyn>,
}

impl BoxLlmProvider {
    pub fn new<T: LlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, LlmError> {
        self.inner.generate_boxed(prompt, settings).await
    }
}

impl std::fmt::Debug for BoxLlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxLlmProvider")
            .field("name", &self.name())
            .finish()
    }
}
