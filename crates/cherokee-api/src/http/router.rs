//! Axum router configuration with middleware.
//!
//! LLM routes live under `/api/llm/`; `/health` sits at the root.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let llm_routes = Router::new()
        .route("/generate-logic", post(handlers::llm::generate_logic))
        .route("/history", get(handlers::llm::history))
        .route("/providers", get(handlers::llm::list_providers));

    Router::new()
        .nest("/api/llm", llm_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use cherokee_core::llm::box_provider::BoxLlmProvider;
    use cherokee_core::llm::fallback::LlmManager;
    use cherokee_core::llm::provider::LlmProvider;
    use cherokee_core::llm::registry::ProviderRegistry;
    use cherokee_types::llm::{GenerationSettings, LlmError};

    /// Replies with a fixed outcome; successful text is suffixed with the prompt.
    struct Scripted(Result<String, LlmError>);

    impl LlmProvider for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(
            &self,
            prompt: &str,
            _settings: &GenerationSettings,
        ) -> Result<String, LlmError> {
            self.0.clone().map(|text| format!("{text}:{prompt}"))
        }
    }

    fn app(default_order: &[&str]) -> Router {
        let mut registry = ProviderRegistry::new();
        registry.register("good", BoxLlmProvider::new(Scripted(Ok("code".into()))));
        registry.register(
            "limited",
            BoxLlmProvider::new(Scripted(Err(LlmError::Api {
                status: Some(429),
                code: Some("rate_limit_exceeded".into()),
                kind: None,
                message: "Rate limit reached".into(),
            }))),
        );
        registry.register(
            "down",
            BoxLlmProvider::new(Scripted(Err(LlmError::Connection("refused".into())))),
        );

        let order = default_order.iter().map(|id| id.to_string()).collect();
        let manager = LlmManager::new(Arc::new(registry), order);
        build_router(AppState::new(manager, Vec::new()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn generate(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/llm/generate-logic")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok() {
        let (status, body) = send(&app(&["good"]), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_generate_success_is_recorded_in_history() {
        let app = app(&["good"]);

        let (status, body) = send(&app, generate(json!({"prompt": "buy dip"}).to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prompt"], "buy dip");
        assert_eq!(body["provider"], "good");
        assert_eq!(body["code"], "code:buy dip");

        let (status, history) = send(&app, get("/api/llm/history")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history.as_array().unwrap().len(), 1);
        assert_eq!(history[0]["provider"], "good");
        assert_eq!(history[0]["code"], "code:buy dip");
    }

    #[tokio::test]
    async fn test_fallback_skips_failing_provider() {
        let (status, body) = send(
            &app(&["down", "good"]),
            generate(json!({"prompt": "p"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider"], "good");
    }

    #[tokio::test]
    async fn test_single_provider_failure_is_502() {
        let app = app(&["good"]);
        let (status, body) = send(
            &app,
            generate(json!({"prompt": "p", "provider": "limited"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "rate_limit_exceeded");
        assert_eq!(body["provider"], "limited");
        assert_eq!(body["details"], "API error (HTTP 429): Rate limit reached");

        let (_, history) = send(&app, get("/api/llm/history")).await;
        assert_eq!(history, json!([]));
    }

    #[tokio::test]
    async fn test_unknown_provider_override_is_502() {
        let (status, body) = send(
            &app(&["good"]),
            generate(json!({"provider": "gpt-9"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "unknown_provider");
        assert_eq!(body["provider"], "gpt-9");
    }

    #[tokio::test]
    async fn test_exhausted_chain_is_503_with_every_failure() {
        let (status, body) = send(
            &app(&["limited", "down"]),
            generate(json!({"prompt": "p"}).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "all_providers_failed");

        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["provider"], "limited");
        assert_eq!(details[0]["error"], "rate_limit_exceeded");
        assert_eq!(details[1]["provider"], "down");
        assert_eq!(details[1]["error"], "network_error");
    }

    #[tokio::test]
    async fn test_malformed_body_is_treated_as_empty() {
        let (status, body) = send(&app(&["good"]), generate("{oops")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prompt"], "");
        assert_eq!(body["code"], "code:");
    }

    #[tokio::test]
    async fn test_providers_lists_default_order() {
        let (status, body) = send(&app(&["down", "good"]), get("/api/llm/providers")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["default_order"], json!(["down", "good"]));
        assert_eq!(body["providers"], json!([]));
    }
}
