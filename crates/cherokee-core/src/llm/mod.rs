//! LLM provider abstractions for Cherokee.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: object-safe wrapper for dynamic dispatch
//! - `ProviderRegistry`: identifier to provider lookup
//! - `classify`: provider error to `ErrorCode` mapping
//! - `LlmManager`: ordered fallback over registry entries

pub mod box_provider;
pub mod classify;
pub mod fallback;
pub mod provider;
pub mod registry;
