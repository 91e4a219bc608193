// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini `generateContent` backend.
//!
//! The API key travels in the `x-goog-api-key` header so it never appears
//! in a request URL.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use switchyard_config::model::GeminiConfig;
use switchyard_core::types::TokenUsage;
use switchyard_core::SwitchyardError;

use crate::backend::{Completion, CompletionBackend, CompletionRequest};
use crate::http::{endpoint, JsonClient};

#[derive(Debug, Clone)]
pub struct GeminiBackend {
    http: JsonClient,
    url: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(
        api_key: &str,
        config: &GeminiConfig,
        timeout: Duration,
    ) -> Result<Self, SwitchyardError> {
        let http = JsonClient::new(&[("x-goog-api-key", api_key)], timeout)?;
        let path = format!("v1beta/models/{}:generateContent", config.model);
        Ok(Self {
            http,
            url: endpoint(&config.base_url, &path),
            model: config.model.clone(),
        })
    }

    fn to_api_request<'a>(&self, request: &'a CompletionRequest) -> GenerateRequest<'a> {
        GenerateRequest {
            system_instruction: request.system.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            contents: request
                .messages
                .iter()
                .map(|m| Content {
                    // Gemini names the assistant side "model".
                    role: Some(if m.role == "assistant" { "model" } else { "user" }),
                    parts: vec![Part {
                        text: m.content.as_str(),
                    }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, SwitchyardError> {
        let body = self.to_api_request(request);
        let response: GenerateResponse = self.http.post_json(&self.url, &body, parse_error).await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(SwitchyardError::provider(
                "Gemini response contained no candidates",
            ));
        }

        Ok(Completion {
            text,
            model: self.model.clone(),
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
        })
    }
}

fn parse_error(body: &str) -> Option<String> {
    let parsed: ApiErrorResponse = serde_json::from_str(body).ok()?;
    let status = parsed.error.status.unwrap_or_else(|| parsed.error.code.to_string());
    Some(format!("Gemini API error ({status}): {}", parsed.error.message))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: u16,
    message: String,
    #[serde(default)]
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::types::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(base_url: String) -> GeminiBackend {
        let config = GeminiConfig {
            base_url,
            ..GeminiConfig::default()
        };
        GeminiBackend::new("AIza-test", &config, Duration::from_secs(5)).unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: None,
            messages: vec![
                ChatMessage {
                    role: "user".into(),
                    content: "hi".into(),
                },
                ChatMessage {
                    role: "assistant".into(),
                    content: "hello".into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: "what is rust?".into(),
                },
            ],
            temperature: 0.7,
            max_tokens: 64,
        }
    }

    #[tokio::test]
    async fn generates_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .and(header("x-goog-api-key", "AIza-test"))
            .and(body_partial_json(serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "model", "parts": [{"text": "hello"}]},
                    {"role": "user", "parts": [{"text": "what is rust?"}]}
                ],
                "generationConfig": {"maxOutputTokens": 64}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": "A language."}]}}],
                "usageMetadata": {"promptTokenCount": 7, "candidatesTokenCount": 3, "totalTokenCount": 10}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let completion = backend(server.uri()).complete(&request()).await.unwrap();
        assert_eq!(completion.text, "A language.");
        assert_eq!(completion.model, "gemini-pro");
        assert_eq!(completion.usage.unwrap().total_tokens, 10);
    }

    #[tokio::test]
    async fn api_error_is_described() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let err = backend(server.uri()).complete(&request()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "provider error: Gemini API error (INVALID_ARGUMENT): API key not valid"
        );
    }
}
