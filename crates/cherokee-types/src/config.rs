//! Provider configuration types for Cherokee.
//!
//! `LlmConfig` is the top-level shape of `cherokee.toml`: the default
//! fallback order plus any provider definitions that add to or replace the
//! built-in set. Environment overrides are applied on top by the infra layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier used when no order is configured anywhere.
pub const DEFAULT_PROVIDER_ID: &str = "openai-gpt4o";

/// Backend variant behind a provider identifier.
///
/// The set is closed: every variant has exactly one implementation in
/// `cherokee-infra`, selected by an exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Hosted chat-completion API (OpenAI-compatible).
    HostedApi,
    /// Generic JSON-over-HTTP endpoint.
    Http,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::HostedApi => write!(f, "hosted_api"),
            ProviderKind::Http => write!(f, "http"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hosted_api" => Ok(ProviderKind::HostedApi),
            "http" => Ok(ProviderKind::Http),
            other => Err(format!("invalid provider kind: '{other}'")),
        }
    }
}

/// Configuration for a single provider identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Registry key (e.g., "openai-gpt4o", "llama3").
    pub id: String,
    pub kind: ProviderKind,
    /// Endpoint URL. For hosted providers this overrides the API base URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Environment variable that, when set, overrides `endpoint`.
    #[serde(default)]
    pub endpoint_env: Option<String>,
    /// Environment variable holding the API key (hosted providers only).
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Model used when the request settings do not name one.
    #[serde(default)]
    pub default_model: Option<String>,
}

impl ProviderConfig {
    /// Hosted-API provider reading its key from `api_key_env`.
    pub fn hosted(id: &str, api_key_env: &str, default_model: &str) -> Self {
        Self {
            id: id.into(),
            kind: ProviderKind::HostedApi,
            endpoint: None,
            endpoint_env: None,
            api_key_env: Some(api_key_env.into()),
            default_model: Some(default_model.into()),
        }
    }

    /// Generic HTTP provider with an env-overridable endpoint.
    pub fn http(id: &str, endpoint_env: &str, endpoint: &str) -> Self {
        Self {
            id: id.into(),
            kind: ProviderKind::Http,
            endpoint: Some(endpoint.into()),
            endpoint_env: Some(endpoint_env.into()),
            api_key_env: None,
            default_model: None,
        }
    }
}

/// Resolved, display-safe view of a provider. Never carries the key itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub id: String,
    pub kind: ProviderKind,
    /// Endpoint after environment overrides. `None` for a hosted provider on its default URL.
    pub endpoint: Option<String>,
    pub has_api_key: bool,
}

/// Top-level LLM configuration.
///
/// Loaded from `cherokee.toml`. All fields have defaults, so an empty or
/// missing file yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Default fallback order, tried first to last.
    #[serde(default = "default_provider_order")]
    pub provider_order: Vec<String>,

    /// Provider definitions. Entries whose `id` matches a built-in replace it.
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

fn default_provider_order() -> Vec<String> {
    vec![DEFAULT_PROVIDER_ID.to_string()]
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_order: default_provider_order(),
            providers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_roundtrip() {
        for kind in [ProviderKind::HostedApi, ProviderKind::Http] {
            let parsed: ProviderKind = kind.to_string().parse().unwrap();
            assert_eq!(kind, parsed);
        }
        assert!("grpc".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_llm_config_default_values() {
        let config = LlmConfig::default();
        assert_eq!(config.provider_order, vec!["openai-gpt4o"]);
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_llm_config_deserialize_with_defaults() {
        let config: LlmConfig = toml::from_str("").unwrap();
        assert_eq!(config, LlmConfig::default());
    }

    #[test]
    fn test_llm_config_deserialize_with_values() {
        let toml_str = r#"
provider_order = ["llama3", "openai-gpt4o"]

[[providers]]
id = "llama3"
kind = "http"
endpoint = "http://gpu-box:8000/v1"

[[providers]]
id = "azure"
kind = "hosted_api"
endpoint = "https://example.openai.azure.com/v1"
api_key_env = "AZURE_OPENAI_KEY"
default_model = "gpt-4o-mini"
"#;
        let config: LlmConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider_order, vec!["llama3", "openai-gpt4o"]);
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers[0].kind, ProviderKind::Http);
        assert!(config.providers[0].endpoint_env.is_none());
        assert_eq!(config.providers[1].kind, ProviderKind::HostedApi);
        assert_eq!(
            config.providers[1].api_key_env.as_deref(),
            Some("AZURE_OPENAI_KEY")
        );
    }

    #[test]
    fn test_provider_config_constructors() {
        let hosted = ProviderConfig::hosted("openai-gpt4o", "OPENAI_API_KEY", "gpt-4o");
        assert_eq!(hosted.kind, ProviderKind::HostedApi);
        assert!(hosted.endpoint.is_none());

        let http = ProviderConfig::http("custom", "CUSTOM_LLM_ENDPOINT", "http://localhost:5001");
        assert_eq!(http.kind, ProviderKind::Http);
        assert_eq!(http.endpoint.as_deref(), Some("http://localhost:5001"));
    }
}
