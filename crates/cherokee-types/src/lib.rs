//! Shared domain types for Cherokee.
//!
//! Generation requests/results, the provider failure taxonomy, and the
//! provider configuration shapes used across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod llm;
