//! Provider error classification.
//!
//! Maps the shape of a failed provider call onto the fixed [`ErrorCode`]
//! taxonomy. Pure and total: anything unrecognized lands in
//! `ErrorCode::UnknownError`.

use cherokee_types::llm::{ErrorCode, LlmError};

const RATE_LIMIT_MARKERS: &[&str] = &["rate_limit_exceeded", "rate_limit_error"];

const QUOTA_MARKERS: &[&str] = &[
    "insufficient_quota",
    "quota_exceeded",
    "permission_denied",
    "permission_error",
];

/// Classify a provider error into an internal error code.
pub fn classify(err: &LlmError) -> ErrorCode {
    match err {
        LlmError::Api {
            status, code, kind, ..
        } => {
            let names = |markers: &[&str]| {
                [code, kind]
                    .into_iter()
                    .flatten()
                    .any(|value| markers.contains(&value.as_str()))
            };

            // An explicit quota code wins over the 429 it usually arrives with.
            if names(QUOTA_MARKERS) || *status == Some(403) {
                ErrorCode::QuotaExceeded
            } else if names(RATE_LIMIT_MARKERS) || *status == Some(429) {
                ErrorCode::RateLimitExceeded
            } else {
                ErrorCode::ApiError
            }
        }
        LlmError::Connection(_) | LlmError::Timeout(_) => ErrorCode::NetworkError,
        LlmError::Deserialization(_) | LlmError::InvalidRequest(_) => ErrorCode::ApiError,
        LlmError::Other(_) => ErrorCode::UnknownError,
    }
}
