//! Infrastructure layer for Cherokee.
//!
//! Contains the concrete provider variants behind the `LlmProvider` trait
//! defined in `cherokee-core` (hosted chat-completion API, generic HTTP
//! endpoint) and the configuration loader that wires them into a registry.

pub mod config;
pub mod llm;
