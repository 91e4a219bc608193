// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Chat Completions backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use switchyard_config::model::OpenAiConfig;
use switchyard_core::types::TokenUsage;
use switchyard_core::SwitchyardError;

use crate::backend::{Completion, CompletionBackend, CompletionRequest};
use crate::http::{endpoint, JsonClient};

const COMPLETIONS_PATH: &str = "v1/chat/completions";

#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    http: JsonClient,
    url: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(
        api_key: &str,
        config: &OpenAiConfig,
        timeout: Duration,
    ) -> Result<Self, SwitchyardError> {
        let bearer = format!("Bearer {api_key}");
        let http = JsonClient::new(&[("authorization", bearer.as_str())], timeout)?;
        Ok(Self {
            http,
            url: endpoint(&config.base_url, COMPLETIONS_PATH),
            model: config.model.clone(),
        })
    }

    fn to_api_request<'a>(&'a self, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = request.system.as_deref() {
            messages.push(ApiMessage {
                role: "system",
                content: system,
            });
        }
        messages.extend(request.messages.iter().map(|m| ApiMessage {
            role: m.role.as_str(),
            content: m.content.as_str(),
        }));
        ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, SwitchyardError> {
        let body = self.to_api_request(request);
        let response: ChatCompletionResponse =
            self.http.post_json(&self.url, &body, parse_error).await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| SwitchyardError::provider("OpenAI response contained no choices"))?;

        Ok(Completion {
            text,
            model: response.model.unwrap_or_else(|| self.model.clone()),
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

fn parse_error(body: &str) -> Option<String> {
    let parsed: ApiErrorResponse = serde_json::from_str(body).ok()?;
    let kind = parsed.error.type_.unwrap_or_else(|| "error".into());
    Some(format!("OpenAI API error ({kind}): {}", parsed.error.message))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    type_: Option<String>,
}
