//! Thin HTTP client for the Perplexity chat-completions endpoint.
//!
//! The client never fails towards its caller. Every problem (missing key,
//! transport error, bad status, odd response shape) comes back as a
//! `CompletionOutcome::Degraded` carrying the `Error: ...` text that the HTTP
//! layer returns in place of chart syntax.
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::completion::payload::CompletionPayload;
use crate::config::API_KEY_VAR;
use crate::error::{AppError, AppResult};
use crate::prompt::builder::DEFAULT_SYSTEM_INSTRUCTION;
use crate::variant::{ErrorPolicy, Variant};

pub const NO_RESPONSE: &str = "Error: No response from API";

/// Result of one completion call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Text produced by the model, untouched.
    Ok(String),
    /// Something went wrong; the string describes what.
    Degraded(String),
}

impl CompletionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CompletionOutcome::Ok(_))
    }

    pub fn as_text(&self) -> &str {
        match self {
            CompletionOutcome::Ok(s) | CompletionOutcome::Degraded(s) => s,
        }
    }

    /// Collapse both tags into the string sent on the wire.
    pub fn into_text(self) -> String {
        match self {
            CompletionOutcome::Ok(s) | CompletionOutcome::Degraded(s) => s,
        }
    }
}

#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    policy: ErrorPolicy,
    max_tokens: u32,
}

impl CompletionClient {
    pub fn new(url: String, api_key: Option<String>, variant: Variant) -> Self {
        CompletionClient {
            client: Client::new(),
            url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            policy: variant.error_policy(),
            max_tokens: variant.max_tokens(),
        }
    }

    /// Complete `prompt` with the default system instruction.
    pub async fn complete(&self, prompt: &str) -> CompletionOutcome {
        self.complete_with_system(prompt, DEFAULT_SYSTEM_INSTRUCTION).await
    }

    pub async fn complete_with_system(&self, prompt: &str, system_instruction: &str) -> CompletionOutcome {
        match self.request_completion(prompt, system_instruction).await {
            Ok(Some(text)) => CompletionOutcome::Ok(text),
            Ok(None) => {
                tracing::warn!("Completion response had no choices[0].message.content");
                CompletionOutcome::Degraded(NO_RESPONSE.to_string())
            }
            Err(e) => {
                tracing::error!("Completion request failed: {}", e);
                CompletionOutcome::Degraded(describe_failure(&e))
            }
        }
    }

    async fn request_completion(&self, prompt: &str, system_instruction: &str) -> AppResult<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::MissingCredential(API_KEY_VAR))?;

        let payload = CompletionPayload::new(system_instruction, prompt, self.max_tokens);
        tracing::info!("Sending prompt to completion API at URL: {}", self.url);
        tracing::debug!("Completion payload: {:?}", payload);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let response = match self.policy {
            ErrorPolicy::Strict => response.error_for_status()?,
            ErrorPolicy::Lenient => {
                let status = response.status();
                if status != StatusCode::OK {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    return Err(AppError::UpstreamStatus { status: status.as_u16(), body });
                }
                response
            }
        };

        let body: Value = response.json().await?;
        Ok(first_choice_content(&body))
    }
}

/// `choices[0].message.content`, if present and a string.
pub fn first_choice_content(body: &Value) -> Option<String> {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn describe_failure(err: &AppError) -> String {
    match err {
        AppError::MissingCredential(_) => format!("Error: {}", err),
        AppError::UpstreamStatus { .. } => format!("Error: {}", err),
        AppError::HttpClient(e) => format!("Error: Failed to connect to Perplexity API - {}", e),
        other => format!("Error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::{http::HeaderMap, routing::post, Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn canned(status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/chat/completions",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    async fn client_for(app: Router, variant: Variant) -> CompletionClient {
        let base = spawn_upstream(app).await;
        CompletionClient::new(format!("{}/chat/completions", base), Some("test-key".into()), variant)
    }

    #[tokio::test]
    async fn missing_key_degrades_without_calling_out() {
        // Port 9 is discard; nothing should be sent there anyway.
        let client = CompletionClient::new("http://127.0.0.1:9/chat/completions".into(), None, Variant::Apex);
        let outcome = client.complete("anything").await;
        assert_eq!(
            outcome,
            CompletionOutcome::Degraded("Error: PERPLEXITY_API_KEY not set in environment variables".into())
        );
    }

    #[tokio::test]
    async fn returns_first_choice_content_exactly() {
        let body = json!({"choices": [{"message": {"content": "<ApexCharts config here>"}}, {"message": {"content": "second"}}]});
        let client = client_for(canned(StatusCode::OK, body), Variant::Apex).await;
        assert_eq!(client.complete("p").await, CompletionOutcome::Ok("<ApexCharts config here>".into()));
    }

    #[tokio::test]
    async fn missing_shape_yields_no_response_marker() {
        for body in [json!({}), json!({"choices": []}), json!({"choices": [{"message": {}}]})] {
            let client = client_for(canned(StatusCode::OK, body), Variant::ChartJs).await;
            assert_eq!(client.complete("p").await, CompletionOutcome::Degraded(NO_RESPONSE.into()));
        }
    }

    #[tokio::test]
    async fn lenient_policy_reports_status_and_body() {
        let body = json!({"error": "bad key"});
        let client = client_for(canned(StatusCode::UNAUTHORIZED, body), Variant::Apex).await;
        let text = client.complete("p").await.into_text();
        assert!(text.starts_with("Error: 401 - "), "{text}");
        assert!(text.contains("bad key"), "{text}");
    }

    #[tokio::test]
    async fn lenient_policy_rejects_non_200_success() {
        let body = json!({"choices": [{"message": {"content": "x"}}]});
        let client = client_for(canned(StatusCode::ACCEPTED, body), Variant::Mermaid).await;
        assert!(client.complete("p").await.into_text().starts_with("Error: 202 - "));
    }

    #[tokio::test]
    async fn strict_policy_describes_status_error() {
        let client = client_for(canned(StatusCode::INTERNAL_SERVER_ERROR, json!({})), Variant::ChartJs).await;
        let text = client.complete("p").await.into_text();
        assert!(text.starts_with("Error: Failed to connect to Perplexity API - "), "{text}");
        assert!(text.contains("500"), "{text}");
    }

    #[tokio::test]
    async fn strict_policy_accepts_any_2xx() {
        let body = json!({"choices": [{"message": {"content": "ok"}}]});
        let client = client_for(canned(StatusCode::ACCEPTED, body), Variant::ChartJs).await;
        assert_eq!(client.complete("p").await, CompletionOutcome::Ok("ok".into()));
    }

    #[tokio::test]
    async fn transport_failure_is_degraded() {
        // Bind then drop to get a port with nothing listening.
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client = CompletionClient::new(
            format!("http://127.0.0.1:{}/chat/completions", port),
            Some("k".into()),
            Variant::Apex,
        );
        let text = client.complete("p").await.into_text();
        assert!(text.starts_with("Error: Failed to connect to Perplexity API - "), "{text}");
    }

    #[tokio::test]
    async fn sends_bearer_token_and_payload() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let app = Router::new().route(
            "/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *sink.lock().unwrap() = Some((auth, body));
                    Json(json!({"choices": [{"message": {"content": "done"}}]}))
                }
            }),
        );
        let client = client_for(app, Variant::Mermaid).await;
        client.complete_with_system("the prompt", "sys").await;

        let (auth, body) = seen.lock().unwrap().clone().expect("request captured");
        assert_eq!(auth, "Bearer test-key");
        assert_eq!(body, serde_json::to_value(CompletionPayload::new("sys", "the prompt", 500)).unwrap());
    }
}
