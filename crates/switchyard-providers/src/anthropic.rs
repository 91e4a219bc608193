// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use switchyard_config::model::AnthropicConfig;
use switchyard_core::types::TokenUsage;
use switchyard_core::SwitchyardError;

use crate::backend::{Completion, CompletionBackend, CompletionRequest};
use crate::http::{endpoint, JsonClient};

const MESSAGES_PATH: &str = "v1/messages";

#[derive(Debug, Clone)]
pub struct AnthropicBackend {
    http: JsonClient,
    url: String,
    model: String,
}

impl AnthropicBackend {
    pub fn new(
        api_key: &str,
        config: &AnthropicConfig,
        timeout: Duration,
    ) -> Result<Self, SwitchyardError> {
        let http = JsonClient::new(
            &[
                ("x-api-key", api_key),
                ("anthropic-version", config.api_version.as_str()),
            ],
            timeout,
        )?;
        Ok(Self {
            http,
            url: endpoint(&config.base_url, MESSAGES_PATH),
            model: config.model.clone(),
        })
    }

    fn to_message_request<'a>(&'a self, request: &'a CompletionRequest) -> MessageRequest<'a> {
        MessageRequest {
            model: &self.model,
            system: request.system.as_deref(),
            messages: request
                .messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.as_str(),
                    content: m.content.as_str(),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, SwitchyardError> {
        let body = self.to_message_request(request);
        let response: MessageResponse = self.http.post_json(&self.url, &body, parse_error).await?;

        let text: String = response
            .content
            .iter()
            .filter_map(|block| match block {
                ResponseBlock::Text { text } => Some(text.as_str()),
                ResponseBlock::Other => None,
            })
            .collect();
        if text.is_empty() {
            return Err(SwitchyardError::provider(
                "Anthropic response contained no text content",
            ));
        }

        Ok(Completion {
            text,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
                total_tokens: u.input_tokens + u.output_tokens,
            }),
        })
    }
}

fn parse_error(body: &str) -> Option<String> {
    let parsed: ApiErrorResponse = serde_json::from_str(body).ok()?;
    Some(format!(
        "Anthropic API error ({}): {}",
        parsed.error.type_, parsed.error.message
    ))
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<ApiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    model: String,
    content: Vec<ResponseBlock>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    type_: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::types::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(base_url: String) -> AnthropicBackend {
        let config = AnthropicConfig {
            base_url,
            ..AnthropicConfig::default()
        };
        AnthropicBackend::new("test-api-key", &config, Duration::from_secs(5)).unwrap()
    }

    fn request(system: Option<&str>) -> CompletionRequest {
        CompletionRequest {
            system: system.map(str::to_string),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            temperature: 0.3,
            max_tokens: 256,
        }
    }

    #[tokio::test]
    async fn sends_headers_and_joins_text_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-3-sonnet-20240229",
                "system": "summarise well",
                "max_tokens": 256
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "model": "claude-3-sonnet-20240229",
                "content": [
                    {"type": "text", "text": "Hi "},
                    {"type": "tool_use", "id": "t", "name": "x", "input": {}},
                    {"type": "text", "text": "there"}
                ],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 10, "output_tokens": 5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let completion = backend(server.uri())
            .complete(&request(Some("summarise well")))
            .await
            .unwrap();
        assert_eq!(completion.text, "Hi there");
        let usage = completion.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 10);
        assert_eq!(usage.total_tokens, 15);
    }

    #[test]
    fn system_prompt_omitted_when_absent() {
        let b = backend("http://localhost".into());
        let req = request(None);
        let body = serde_json::to_value(b.to_message_request(&req)).unwrap();
        assert!(body.get("system").is_none());
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn api_error_is_described() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "invalid_request_error", "message": "Bad model"}
            })))
            .mount(&server)
            .await;

        let err = backend(server.uri()).complete(&request(None)).await.unwrap_err();
        assert!(err.to_string().contains("invalid_request_error"), "got: {err}");
    }
}
