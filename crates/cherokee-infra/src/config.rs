//! LLM configuration loader for Cherokee.
//!
//! Reads `cherokee.toml` and deserializes it into [`LlmConfig`], falling back
//! to defaults when the file is missing or malformed. Environment variables
//! are layered on top: `LLM_PROVIDER_ORDER` replaces the default order, each
//! provider's `endpoint_env` replaces its endpoint, and API keys are only ever
//! read from the environment.
//!
//! Environment access goes through a lookup function so callers (and tests)
//! decide where values come from.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use cherokee_types::config::{LlmConfig, ProviderConfig, ProviderSummary};

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE_NAME: &str = "cherokee.toml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "CHEROKEE_CONFIG";

/// Comma-separated default provider order.
pub const PROVIDER_ORDER_ENV: &str = "LLM_PROVIDER_ORDER";

/// Read a variable from the process environment, treating blank values as unset.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// The providers every deployment knows about.
pub fn builtin_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::hosted("openai-gpt4o", "OPENAI_API_KEY", "gpt-4o"),
        ProviderConfig::http("llama3", "LLAMA3_ENDPOINT", "http://localhost:8000/v1"),
        ProviderConfig::http("deepseek", "DEEPSEEK_ENDPOINT", "https://api.deepseek.com/v1"),
        ProviderConfig::http("starcoder", "STARCODER_ENDPOINT", "http://localhost:9000/v1"),
        ProviderConfig::http("custom", "CUSTOM_LLM_ENDPOINT", "http://localhost:5001"),
    ]
}

/// Pick the config file: explicit path, then `CHEROKEE_CONFIG`, then `./cherokee.toml`.
pub fn resolve_config_path<L>(explicit: Option<&Path>, lookup: &L) -> PathBuf
where
    L: Fn(&str) -> Option<String>,
{
    explicit
        .map(Path::to_path_buf)
        .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Failure to load a config file that exists.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Read and parse `path`. Returns `Ok(None)` when the file does not exist.
pub async fn try_load_llm_config(path: &Path) -> Result<Option<LlmConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Load LLM configuration from `path`.
///
/// - If the file does not exist, returns [`LlmConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_llm_config(path: &Path) -> LlmConfig {
    match try_load_llm_config(path).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            LlmConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            LlmConfig::default()
        }
    }
}

/// Built-in providers with the file's definitions applied.
///
/// A file entry whose `id` matches a built-in replaces it in place; other
/// entries are appended in file order.
pub fn effective_providers(config: &LlmConfig) -> Vec<ProviderConfig> {
    let mut providers = builtin_providers();
    for entry in &config.providers {
        match providers.iter_mut().find(|p| p.id == entry.id) {
            Some(existing) => *existing = entry.clone(),
            None => providers.push(entry.clone()),
        }
    }
    providers
}

/// Resolve the default provider order.
///
/// `LLM_PROVIDER_ORDER` wins when it names at least one provider; otherwise
/// the file's `provider_order` is used.
pub fn resolve_provider_order<L>(config: &LlmConfig, lookup: &L) -> Vec<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(PROVIDER_ORDER_ENV)
        .map(|raw| parse_provider_order(&raw))
        .filter(|order| !order.is_empty())
        .unwrap_or_else(|| config.provider_order.clone())
}

/// Split a comma-separated order, dropping blank entries. Duplicates are kept.
pub fn parse_provider_order(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Endpoint for a provider: its `endpoint_env` variable if set, else `endpoint`.
pub fn resolve_endpoint<L>(provider: &ProviderConfig, lookup: &L) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    provider
        .endpoint_env
        .as_deref()
        .and_then(lookup)
        .or_else(|| provider.endpoint.clone())
}

/// API key for a provider, read from its `api_key_env` variable.
pub fn resolve_api_key<L>(provider: &ProviderConfig, lookup: &L) -> Option<SecretString>
where
    L: Fn(&str) -> Option<String>,
{
    provider
        .api_key_env
        .as_deref()
        .and_then(lookup)
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
}

/// Display-safe summaries of `providers` with endpoints and keys resolved.
pub fn summarize_providers<L>(providers: &[ProviderConfig], lookup: &L) -> Vec<ProviderSummary>
where
    L: Fn(&str) -> Option<String>,
{
    providers
        .iter()
        .map(|provider| ProviderSummary {
            id: provider.id.clone(),
            kind: provider.kind,
            endpoint: resolve_endpoint(provider, lookup),
            has_api_key: resolve_api_key(provider, lookup).is_some(),
        })
        .collect()
}
