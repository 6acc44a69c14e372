//! Generic JSON-over-HTTP provider.
//!
//! POSTs `{"prompt": ..., <settings>}` to a configured endpoint and pulls the
//! generated text out of the JSON reply. Any failure (unset endpoint,
//! transport error, non-2xx status, malformed body) is logged and degraded to
//! placeholder text, so this provider never fails a fallback chain.

use std::time::Duration;

use serde_json::{Map, Value};

use cherokee_core::llm::provider::LlmProvider;
use cherokee_types::llm::{GenerationSettings, LlmError};

use super::{map_reqwest_error, placeholder_text};

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    endpoint: Option<String>,
    timeout: Duration,
}

impl HttpProvider {
    /// `endpoint` of `None` means the provider is unconfigured and always
    /// answers with placeholder text.
    pub fn new(client: reqwest::Client, endpoint: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn call(&self, endpoint: &str, prompt: &str, settings: &GenerationSettings) -> Result<Value, LlmError> {
        let response = self
            .client
            .post(endpoint)
            .timeout(self.timeout)
            .json(&request_body(prompt, settings))
            .send()
            .await
            .map_err(map_reqwest_error)?
            .error_for_status()
            .map_err(map_reqwest_error)?;

        response.json::<Value>().await.map_err(map_reqwest_error)
    }
}

impl LlmProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate(&self, prompt: &str, settings: &GenerationSettings) -> Result<String, LlmError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            tracing::warn!("HTTP provider has no endpoint, returning placeholder");
            return Ok(placeholder_text(prompt));
        };

        let body = match self.call(endpoint, prompt, settings).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(endpoint, error = %err, "HTTP provider call failed, returning placeholder");
                return Ok(placeholder_text(prompt));
            }
        };

        match extract_text(&body) {
            Some(text) => Ok(text),
            None => {
                tracing::warn!(endpoint, "HTTP provider returned a non-object body, returning placeholder");
                Ok(placeholder_text(prompt))
            }
        }
    }
}

/// `{"prompt": prompt}` with every setting merged over it.
fn request_body(prompt: &str, settings: &GenerationSettings) -> Value {
    let mut body = Map::new();
    body.insert("prompt".to_string(), Value::String(prompt.to_string()));
    for (key, value) in settings.as_map() {
        body.insert(key.clone(), value.clone());
    }
    Value::Object(body)
}

/// Text from a reply object: `text`, else `code`, else the whole body.
///
/// Returns `None` when the body is not a JSON object.
fn extract_text(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    let field = ["text", "code"]
        .into_iter()
        .filter_map(|key| object.get(key))
        .find(|value| is_truthy(value));

    Some(match field {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => body.to_string(),
    })
}

/// Empty strings, zero, `false`, `null` and empty containers count as missing.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PLACEHOLDER: &str = "# Generated code placeholder for: make a bot";

    fn provider_for(server: &MockServer) -> HttpProvider {
        HttpProvider::new(reqwest::Client::new(), Some(format!("{}/generate", server.uri())))
    }

    async fn serve(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_returns_text_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_json(json!({"prompt": "make a bot", "temperature": 0.5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "print(1)"})))
            .expect(1)
            .mount(&server)
            .await;

        let settings = GenerationSettings::new().with("temperature", 0.5);
        let text = provider_for(&server).generate("make a bot", &settings).await.unwrap();
        assert_eq!(text, "print(1)");
    }

    #[tokio::test]
    async fn test_falls_back_to_code_field() {
        let server = MockServer::start().await;
        serve(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"text": "", "code": "x = 1"})),
        )
        .await;

        let text = provider_for(&server)
            .generate("make a bot", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, "x = 1");
    }

    #[tokio::test]
    async fn test_falls_back_to_whole_body() {
        let server = MockServer::start().await;
        serve(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"result": "ok"})),
        )
        .await;

        let text = provider_for(&server)
            .generate("make a bot", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, r#"{"result":"ok"}"#);
    }

    #[tokio::test]
    async fn test_non_string_field_is_rendered_as_json() {
        let server = MockServer::start().await;
        serve(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"code": ["a", "b"]})),
        )
        .await;

        let text = provider_for(&server)
            .generate("make a bot", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, r#"["a","b"]"#);
    }

    #[tokio::test]
    async fn test_server_error_degrades_to_placeholder() {
        let server = MockServer::start().await;
        serve(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

        let text = provider_for(&server)
            .generate("make a bot", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_non_json_body_degrades_to_placeholder() {
        let server = MockServer::start().await;
        serve(&server, ResponseTemplate::new(200).set_body_string("<html>")).await;

        let text = provider_for(&server)
            .generate("make a bot", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_array_body_degrades_to_placeholder() {
        let server = MockServer::start().await;
        serve(&server, ResponseTemplate::new(200).set_body_json(json!(["text"]))).await;

        let text = provider_for(&server)
            .generate("make a bot", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_placeholder() {
        let provider = HttpProvider::new(
            reqwest::Client::new(),
            Some("http://127.0.0.1:9/generate".to_string()),
        );
        let text = provider
            .generate("make a bot", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_missing_endpoint_returns_placeholder() {
        let provider = HttpProvider::new(reqwest::Client::new(), None);
        let text = provider
            .generate("make a bot", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out_to_placeholder() {
        let server = MockServer::start().await;
        serve(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(json!({"text": "too late"}))
                .set_delay(Duration::from_millis(500)),
        )
        .await;

        let text = provider_for(&server)
            .with_timeout(Duration::from_millis(50))
            .generate("make a bot", &GenerationSettings::new())
            .await
            .unwrap();
        assert_eq!(text, PLACEHOLDER);
    }

    #[test]
    fn test_settings_override_prompt_key() {
        let settings = GenerationSettings::new().with("prompt", "overridden");
        let body = request_body("original", &settings);
        assert_eq!(body, json!({"prompt": "overridden"}));
    }

    #[test]
    fn test_truthiness_matches_expectations() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!([])));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(3)));
        assert!(is_truthy(&json!({"a": 1})));
    }
}
