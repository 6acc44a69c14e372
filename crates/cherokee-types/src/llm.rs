//! LLM generation types for Cherokee.
//!
//! These types model the data shapes for one orchestrated generation:
//! the opaque settings passed to providers, the successful result, the
//! per-provider failure and its taxonomy code, and the aggregate failure
//! raised when a whole fallback chain is exhausted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Internal taxonomy a provider failure is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    RateLimitExceeded,
    QuotaExceeded,
    NetworkError,
    ApiError,
    UnknownProvider,
    UnknownError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            ErrorCode::QuotaExceeded => "quota_exceeded",
            ErrorCode::NetworkError => "network_error",
            ErrorCode::ApiError => "api_error",
            ErrorCode::UnknownProvider => "unknown_provider",
            ErrorCode::UnknownError => "unknown_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rate_limit_exceeded" => Ok(ErrorCode::RateLimitExceeded),
            "quota_exceeded" => Ok(ErrorCode::QuotaExceeded),
            "network_error" => Ok(ErrorCode::NetworkError),
            "api_error" => Ok(ErrorCode::ApiError),
            "unknown_provider" => Ok(ErrorCode::UnknownProvider),
            "unknown_error" => Ok(ErrorCode::UnknownError),
            other => Err(format!("invalid error code: '{other}'")),
        }
    }
}

/// Generation options passed opaquely to a provider.
///
/// Recognized keys are `model`, `systemPrompt`, `temperature` and
/// `maxTokens`. Anything else is kept as-is: the HTTP provider forwards
/// every key, the hosted provider ignores the ones it does not know.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationSettings(Map<String, Value>);

impl GenerationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Provider-specific model name.
    pub fn model(&self) -> Option<&str> {
        self.0.get("model").and_then(Value::as_str)
    }

    /// System-role instruction sent ahead of the prompt.
    pub fn system_prompt(&self) -> Option<&str> {
        self.0.get("systemPrompt").and_then(Value::as_str)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.0.get("temperature").and_then(Value::as_f64)
    }

    /// Output length cap. Negative or fractional values count as absent.
    pub fn max_tokens(&self) -> Option<u32> {
        self.0
            .get("maxTokens")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for GenerationSettings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Result of one successful orchestration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Identifier of the provider that produced the text.
    pub provider: String,
    pub text: String,
}

/// A single provider attempt that did not produce text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("provider '{provider}' failed ({code}): {details}")]
pub struct ProviderFailure {
    pub code: ErrorCode,
    pub provider: String,
    /// Human-readable diagnostic, usually the underlying error message.
    pub details: String,
}

impl ProviderFailure {
    pub fn new(code: ErrorCode, provider: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            code,
            provider: provider.into(),
            details: details.into(),
        }
    }

    /// Failure recorded when an identifier has no registered provider.
    pub fn unknown_provider(provider: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::UnknownProvider,
            provider,
            "Provider not configured",
        )
    }
}

/// Every failure from an exhausted fallback chain, in attempt order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("all {} providers failed", .failures.len())]
pub struct AggregateFailure {
    failures: Vec<ProviderFailure>,
}

impl AggregateFailure {
    /// Wrap the recorded failures. Returns `None` for an empty list since an
    /// aggregate without attempts is meaningless.
    pub fn new(failures: Vec<ProviderFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    pub fn failures(&self) -> &[ProviderFailure] {
        &self.failures
    }
}

/// Failure of an orchestrated generation.
///
/// A chain of exactly one provider fails with [`GenerateError::Provider`];
/// longer chains fail with [`GenerateError::Exhausted`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Provider(ProviderFailure),

    #[error(transparent)]
    Exhausted(AggregateFailure),

    #[error("no providers configured")]
    NoProviders,
}

impl GenerateError {
    /// All per-provider failures behind this error, in attempt order.
    pub fn failures(&self) -> &[ProviderFailure] {
        match self {
            GenerateError::Provider(failure) => std::slice::from_ref(failure),
            GenerateError::Exhausted(aggregate) => aggregate.failures(),
            GenerateError::NoProviders => &[],
        }
    }
}

/// Errors raised by a provider's own call, before classification.
///
/// Keeps the shape of the underlying client error (HTTP status, API error
/// code and type) so the classifier can map it onto an [`ErrorCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("{}", format_api_error(.status, .message))]
    Api {
        status: Option<u16>,
        code: Option<String>,
        kind: Option<String>,
        message: String,
    },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Other(String),
}

fn format_api_error(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("API error (HTTP {status}): {message}"),
        None => format!("API error: {message}"),
    }
}
