//! Reqwest-backed client for any endpoint speaking the OpenAI-compatible
//! `/v1/chat/completions` shape (LM Studio, Ollama, vLLM, hosted APIs).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::traits::{ChatApi, ChatMessage};
use crate::config::EngineConfig;
use crate::error::ProviderError;

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Shared client settings for provider calls: generous overall timeout for
/// slow local models, pooled connections for the sequential call bursts the
/// engine makes.
pub fn build_provider_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn extract_text(response: ChatResponse) -> Result<String, ProviderError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(ProviderError::EmptyReply)
}

fn truncate_error_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }

    let mut end = MAX_ERROR_BODY_CHARS;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// HTTP implementation of [`ChatApi`] against one fixed endpoint and model.
pub struct HttpChatClient {
    endpoint_url: String,
    model: String,
    client: Client,
}

impl HttpChatClient {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            endpoint_url: config.endpoint_url.to_string(),
            model: config.model.clone(),
            client: build_provider_client(),
        }
    }

    async fn call_chat_completions(
        &self,
        request: &ChatRequest<'_>,
    ) -> Result<ChatResponse, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .json(request)
            .send()
            .await
            .map_err(|source| ProviderError::Transport {
                url: self.endpoint_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_error_body(&body),
            });
        }

        response
            .json()
            .await
            .map_err(|error| ProviderError::Decode {
                message: error.to_string(),
            })
    }
}

impl ChatApi for HttpChatClient {
    fn complete<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        max_tokens: u32,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>> {
        Box::pin(async move {
            let request = ChatRequest {
                model: &self.model,
                messages,
                max_tokens,
                temperature,
            };
            let response = self.call_chat_completions(&request).await?;
            extract_text(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(endpoint: &str) -> HttpChatClient {
        let config = Settings::default()
            .with_endpoint_url(endpoint)
            .with_model("test-model")
            .resolve()
            .unwrap();
        HttpChatClient::new(&config)
    }

    fn chat_body(content: &str) -> serde_json::Value {
        serde_json::json!({"choices": [{"message": {"content": content}}]})
    }

    #[test]
    fn request_serializes_with_protocol_params() {
        let messages = vec![
            ChatMessage::system("You are an AI assistant that helps prioritize tasks."),
            ChatMessage::user("Task: 'x'."),
        ];
        let request = ChatRequest {
            model: "local-model",
            messages: &messages,
            max_tokens: 10,
            temperature: 0.2,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "local-model");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["max_tokens"], 10);
        assert_eq!(value["temperature"], 0.2);
    }

    #[test]
    fn response_deserializes() {
        let json = r#"{"choices":[{"message":{"content":"85"}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("85"));
    }

    #[test]
    fn response_tolerates_extra_fields() {
        let json = r#"{"id":"cmpl-1","object":"chat.completion","choices":[{"index":0,"message":{"role":"assistant","content":"ok"},"finish_reason":"stop"}],"usage":{"total_tokens":3}}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content.as_deref(), Some("ok"));
    }

    #[test]
    fn extract_trims_first_choice() {
        let response = ChatResponse {
            choices: vec![Choice {
                message: ResponseMessage {
                    content: Some("  85  \n".to_string()),
                },
            }],
        };
        assert_eq!(extract_text(response).unwrap(), "85");
    }

    #[test]
    fn extract_rejects_empty_and_whitespace_content() {
        let no_choices = ChatResponse { choices: vec![] };
        assert!(matches!(
            extract_text(no_choices),
            Err(ProviderError::EmptyReply)
        ));

        let blank = ChatResponse {
            choices: vec![Choice {
                message: ResponseMessage {
                    content: Some("   ".to_string()),
                },
            }],
        };
        assert!(matches!(extract_text(blank), Err(ProviderError::EmptyReply)));
    }

    #[test]
    fn error_body_is_capped() {
        let long = "x".repeat(500);
        let capped = truncate_error_body(&long);
        assert_eq!(capped.len(), MAX_ERROR_BODY_CHARS + 3);
        assert!(capped.ends_with("..."));

        assert_eq!(truncate_error_body("short"), "short");
    }

    #[tokio::test]
    async fn completes_against_mock_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(
                serde_json::json!({"model": "test-model", "max_tokens": 10, "temperature": 0.2}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("  85  ")))
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/v1/chat/completions", server.uri()));
        let reply = client
            .complete(&[ChatMessage::user("score?")], 10, 0.2)
            .await
            .unwrap();
        assert_eq!(reply, "85");
    }

    #[tokio::test]
    async fn non_2xx_status_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/v1/chat/completions", server.uri()));
        let err = client
            .complete(&[ChatMessage::user("hi")], 10, 0.2)
            .await
            .unwrap_err();
        match err {
            ProviderError::Status { status, body } => {
                assert_eq!(status, 503);
                assert!(body.contains("model loading"));
            }
            other => panic!("expected status error, got {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_success_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&format!("{}/v1/chat/completions", server.uri()));
        let err = client
            .complete(&[ChatMessage::user("hi")], 10, 0.2)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }), "got {err}");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Port 1 refuses connections immediately.
        let client = client_for("http://127.0.0.1:1/v1/chat/completions");
        let err = client
            .complete(&[ChatMessage::user("hi")], 10, 0.2)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Transport { .. }), "got {err}");
    }
}
