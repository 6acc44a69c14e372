//! LlmProvider trait definition.
//!
//! This is the core abstraction that every provider variant implements.

use cherokee_types::llm::{GenerationSettings, LlmError};

/// Trait for text-generation backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Implementations
/// hold only their fixed configuration, so one instance can serve concurrent
/// `generate` calls without locking.
///
/// Implementations live in cherokee-infra (`OpenAiProvider`, `HttpProvider`).
pub trait LlmProvider: Send + Sync {
    /// Short backend name for logs (e.g., "openai", "http").
    fn name(&self) -> &str;

    /// Turn a prompt into generated text.
    fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
