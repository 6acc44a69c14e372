//! Application state shared by CLI commands and REST handlers.
//!
//! AppState owns the fallback manager and the generation history. Nothing
//! here is global: `main` builds one instance and passes it down.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use cherokee_core::llm::fallback::LlmManager;
use cherokee_infra::config::{
    effective_providers, env_lookup, load_llm_config, resolve_config_path, summarize_providers,
};
use cherokee_infra::llm::build_manager;
use cherokee_types::config::ProviderSummary;

use crate::history::HistoryStore;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<LlmManager>,
    pub history: Arc<HistoryStore>,
    pub providers: Arc<Vec<ProviderSummary>>,
}

/// Default fallback order plus every configured provider.
#[derive(Debug, Serialize)]
pub struct ProviderListing {
    pub default_order: Vec<String>,
    pub providers: Vec<ProviderSummary>,
}

impl AppState {
    /// Load configuration from disk and the process environment and wire the manager.
    ///
    /// Never fails: missing or broken configuration degrades to defaults.
    pub async fn init(config_path: Option<&Path>) -> Self {
        let path = resolve_config_path(config_path, &env_lookup);
        let config = load_llm_config(&path).await;

        let manager = build_manager(&config, None, &env_lookup);
        let providers = summarize_providers(&effective_providers(&config), &env_lookup);

        Self::new(manager, providers)
    }

    pub fn new(manager: LlmManager, providers: Vec<ProviderSummary>) -> Self {
        Self {
            manager: Arc::new(manager),
            history: Arc::new(HistoryStore::new()),
            providers: Arc::new(providers),
        }
    }

    pub fn provider_listing(&self) -> ProviderListing {
        ProviderListing {
            default_order: self.manager.default_order().to_vec(),
            providers: self.providers.as_ref().clone(),
        }
    }
}
