//! Application error type mapping generation failures to HTTP responses.
//!
//! - A failed single-provider chain maps to 502 with the provider's error code.
//! - An exhausted multi-provider chain maps to 503 with every failure listed.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use cherokee_types::llm::GenerateError;

/// Error code reported when every provider in a chain failed.
pub const ALL_PROVIDERS_FAILED: &str = "all_providers_failed";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The fallback chain produced no text.
    Generate(GenerateError),
}

impl From<GenerateError> for AppError {
    fn from(e: GenerateError) -> Self {
        AppError::Generate(e)
    }
}

/// Status and JSON body describing a failed generation.
///
/// Shared with the CLI so `--json` output matches the API.
pub fn generate_error_body(err: &GenerateError) -> (StatusCode, Value) {
    match err {
        GenerateError::Provider(failure) => (
            StatusCode::BAD_GATEWAY,
            json!({
                "error": failure.code,
                "provider": failure.provider,
                "details": failure.details,
            }),
        ),
        GenerateError::Exhausted(_) | GenerateError::NoProviders => {
            let details: Vec<Value> = err
                .failures()
                .iter()
                .map(|failure| {
                    json!({
                        "provider": failure.provider,
                        "error": failure.code,
                        "details": failure.details,
                    })
                })
                .collect();
            (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": ALL_PROVIDERS_FAILED, "details": details }),
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Generate(err) => {
                let (status, body) = generate_error_body(err);
                (status, Json(body)).into_response()
            }
        }
    }
}
