//! LLM generation endpoints.
//!
//! POST /api/llm/generate-logic - Run one generation through the fallback chain.
//! GET  /api/llm/history        - Successful generations, oldest first.
//! GET  /api/llm/providers      - Default order and configured providers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::{Map, Value};

use cherokee_types::llm::GenerationSettings;

use crate::history::HistoryEntry;
use crate::http::error::AppError;
use crate::state::{AppState, ProviderListing};

/// Parsed body of a generate request.
///
/// The body is read leniently: anything that is not a JSON object counts as
/// `{}`, and fields of the wrong type count as absent.
#[derive(Debug, Default, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub provider: Option<String>,
    pub settings: GenerationSettings,
}

impl GenerateRequest {
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(Value::Object(mut object)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        let prompt = match object.remove("prompt") {
            Some(Value::String(prompt)) => prompt,
            _ => String::new(),
        };
        let provider = match object.remove("provider") {
            Some(Value::String(id)) if !id.is_empty() => Some(id),
            _ => None,
        };
        let settings = match object.remove("settings") {
            Some(Value::Object(map)) => GenerationSettings::from(map),
            _ => GenerationSettings::from(Map::new()),
        };

        Self {
            prompt,
            provider,
            settings,
        }
    }
}

/// POST /api/llm/generate-logic - Generate code for a prompt.
///
/// A `provider` in the body restricts the chain to that one provider.
pub async fn generate_logic(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<HistoryEntry>, AppError> {
    let request = GenerateRequest::from_body(&body);
    let order = request.provider.map(|id| vec![id]);

    let result = state
        .manager
        .generate(&request.prompt, &request.settings, order.as_deref())
        .await?;

    tracing::info!(provider = %result.provider, "Generation succeeded");

    let entry = state
        .history
        .record(request.prompt, result.provider, result.text)
        .await;
    Ok(Json(entry))
}

/// GET /api/llm/history
pub async fn history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.list().await)
}

/// GET /api/llm/providers
pub async fn list_providers(State(state): State<AppState>) -> Json<ProviderListing> {
    Json(state.provider_listing())
}
