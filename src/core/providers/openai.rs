//! OpenAI-compatible provider implementation (Groq by default)

use crate::core::provider::{Provider, ProviderError};
use crate::models::openai::{OpenAIChatCompletionRequest, OpenAIChatCompletionResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Provider for any endpoint speaking the OpenAI chat-completions protocol
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: u64,
}

impl OpenAIProvider {
    /// Create a new provider
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer token for the endpoint
    /// * `base_url` - API base URL, e.g. `https://api.groq.com/openai/v1`
    /// * `timeout` - Request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Unexpected` if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeout: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| ProviderError::Unexpected(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Classify API errors and provide helpful messages
    fn classify_error(error_detail: &str) -> String {
        let detail = extract_error_message(error_detail);
        let error_lower = detail.to_lowercase();

        if error_lower.contains("invalid_api_key")
            || error_lower.contains("invalid api key")
            || error_lower.contains("unauthorized")
        {
            return "Invalid API key. Please check your GROQ_API_KEY configuration.".to_string();
        }

        if error_lower.contains("rate_limit")
            || error_lower.contains("rate limit")
            || error_lower.contains("quota")
        {
            return "Rate limit exceeded. Please wait and try again, or lower AGENT_MAX_TOKENS."
                .to_string();
        }

        if error_lower.contains("model")
            && (error_lower.contains("not found")
                || error_lower.contains("does not exist")
                || error_lower.contains("decommissioned"))
        {
            return "Model not found. Please check your GROQ_MODEL configuration.".to_string();
        }

        if error_lower.contains("context_length") || error_lower.contains("context length") {
            return "Prompt too long for the model context. Try a smaller AGENT_MAX_TOKENS or a larger model."
                .to_string();
        }

        detail
    }

    fn classify_transport(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else if e.is_connect() || e.is_request() {
            ProviderError::Network(e.to_string())
        } else {
            ProviderError::Unexpected(e.to_string())
        }
    }
}

/// Pull `error.message` out of an OpenAI-style error body, falling back to the raw text
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            let error = value.get("error")?;
            let message = error.get("message")?.as_str()?;
            let code = error.get("code").and_then(|c| c.as_str());
            Some(match code {
                Some(code) => format!("{} ({})", message, code),
                None => message.to_string(),
            })
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl Provider for OpenAIProvider {
    async fn create_chat_completion(
        &self,
        request: &OpenAIChatCompletionRequest,
    ) -> Result<OpenAIChatCompletionResponse, ProviderError> {
        let url = self.completions_url();
        debug!(
            "POST {} model={} messages={}",
            url,
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Completion request failed with status {}", status);
            return Err(ProviderError::from_status(
                status.as_u16(),
                Self::classify_error(&error_text),
            ));
        }

        let completion: OpenAIChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("Failed to parse response: {}", e)))?;

        Ok(completion)
    }

    fn provider_name(&self) -> &str {
        if self.base_url.contains("groq.com") {
            "Groq"
        } else {
            "OpenAI-compatible"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::openai::OpenAIMessage;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn sample_request() -> OpenAIChatCompletionRequest {
        OpenAIChatCompletionRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages: vec![
                OpenAIMessage::system("You are a tester."),
                OpenAIMessage::user("Say hello"),
            ],
            max_tokens: Some(16),
            temperature: Some(0.7),
            stream: false,
        }
    }

    async fn echo_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer gsk-test");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"message": "Invalid API Key", "code": "invalid_api_key"}})),
            );
        }

        let prompt = body["messages"][1]["content"].as_str().unwrap_or_default();
        (
            StatusCode::OK,
            Json(json!({
                "id": "chatcmpl-test",
                "object": "chat.completion",
                "created": 1730000000,
                "model": body["model"],
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": format!("echo: {}", prompt)},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            })),
        )
    }

    #[tokio::test]
    async fn test_completion_round_trip() {
        let base = spawn_server(Router::new().route("/chat/completions", post(echo_completion))).await;
        let provider = OpenAIProvider::new("gsk-test".to_string(), format!("{}/", base), 5).unwrap();

        let response = provider.create_chat_completion(&sample_request()).await.unwrap();
        assert_eq!(response.first_text(), Some("echo: Say hello"));
        assert_eq!(response.model, "llama-3.1-8b-instant");
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[tokio::test]
    async fn test_invalid_key_is_classified() {
        let base = spawn_server(Router::new().route("/chat/completions", post(echo_completion))).await;
        let provider = OpenAIProvider::new("wrong".to_string(), base, 5).unwrap();

        let err = provider.create_chat_completion(&sample_request()).await.unwrap_err();
        match err {
            ProviderError::Authentication(message) => assert!(message.contains("GROQ_API_KEY")),
            other => panic!("expected authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream overloaded") }),
        );
        let base = spawn_server(router).await;
        let provider = OpenAIProvider::new("gsk-test".to_string(), base, 5).unwrap();

        let err = provider.create_chat_completion(&sample_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "API error (status 503): upstream overloaded");
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "late"
            }),
        );
        let base = spawn_server(router).await;
        let provider = OpenAIProvider::new("gsk-test".to_string(), base, 1).unwrap();

        let err = provider.create_chat_completion(&sample_request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(1)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = OpenAIProvider::new("gsk-test".to_string(), format!("http://{}", addr), 5).unwrap();
        let err = provider.create_chat_completion(&sample_request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[test]
    fn test_classify_rate_limit() {
        let body = r#"{"error":{"message":"Rate limit reached for model","type":"tokens","code":"rate_limit_exceeded"}}"#;
        let result = OpenAIProvider::classify_error(body);
        assert!(result.contains("Rate limit"));
    }

    #[test]
    fn test_classify_model_not_found() {
        let body = r#"{"error":{"message":"The model `llama-9` does not exist","code":"model_not_found"}}"#;
        let result = OpenAIProvider::classify_error(body);
        assert!(result.contains("GROQ_MODEL"));
    }

    #[test]
    fn test_classify_passthrough() {
        assert_eq!(OpenAIProvider::classify_error("  gateway hiccup \n"), "gateway hiccup");
    }

    #[test]
    fn test_provider_name() {
        let groq = OpenAIProvider::new("k".into(), "https://api.groq.com/openai/v1".into(), 5).unwrap();
        assert_eq!(groq.provider_name(), "Groq");
        let local = OpenAIProvider::new("k".into(), "http://localhost:11434/v1".into(), 5).unwrap();
        assert_eq!(local.provider_name(), "OpenAI-compatible");
    }
}
