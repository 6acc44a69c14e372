//! Business logic for Cherokee.
//!
//! Defines the provider capability trait and the orchestration built on it.
//! Depends only on `cherokee-types` -- never on `cherokee-infra` or any
//! network crate.

pub mod llm;
