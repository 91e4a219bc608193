// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The language-model adapter served for every provider slot.
//!
//! With a backend it builds task prompts and forwards them; without one it
//! answers with a labelled placeholder so callers get a well-formed reply.

use std::sync::Arc;

use async_trait::async_trait;
use switchyard_core::traits::{ChatCall, ModelReply, SearchCall, SummariseCall};
use switchyard_core::{
    AdapterType, HealthStatus, LanguageModelAdapter, PluginAdapter, Provider, SwitchyardError,
};
use tracing::debug;

use crate::backend::{CompletionBackend, CompletionRequest};
use crate::prompt;

/// Characters of content echoed in a placeholder summary.
const PLACEHOLDER_EXCERPT_CHARS: usize = 100;

const PLACEHOLDER_SUFFIX: &str = "(placeholder - no API key)";

pub struct ModelAdapter {
    provider: Provider,
    model: String,
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl ModelAdapter {
    /// An adapter that only produces placeholder replies.
    pub fn placeholder(provider: Provider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            backend: None,
        }
    }

    pub fn with_backend(
        provider: Provider,
        model: impl Into<String>,
        backend: Arc<dyn CompletionBackend>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            backend: Some(backend),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    async fn run(
        &self,
        backend: &dyn CompletionBackend,
        task: &'static str,
        request: CompletionRequest,
    ) -> Result<ModelReply, SwitchyardError> {
        debug!(provider = %self.provider, task, "calling model backend");
        let completion = backend.complete(&request).await?;
        Ok(ModelReply {
            text: completion.text,
            model: completion.model,
            usage: completion.usage,
            placeholder: false,
        })
    }

    fn placeholder_reply(&self, text: String) -> ModelReply {
        ModelReply {
            text: format!("{text} {PLACEHOLDER_SUFFIX}"),
            model: self.model.clone(),
            usage: None,
            placeholder: true,
        }
    }
}

#[async_trait]
impl PluginAdapter for ModelAdapter {
    fn name(&self) -> &str {
        match self.provider {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
        }
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::LanguageModel
    }

    async fn health_check(&self) -> Result<HealthStatus, SwitchyardError> {
        if self.is_configured() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(format!(
                "{} API key not configured; serving placeholder replies",
                self.provider.display_name()
            )))
        }
    }
}

#[async_trait]
impl LanguageModelAdapter for ModelAdapter {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn chat(&self, call: ChatCall) -> Result<ModelReply, SwitchyardError> {
        match &self.backend {
            Some(backend) => {
                self.run(backend.as_ref(), "chat", prompt::chat_request(&call))
                    .await
            }
            None => Ok(self.placeholder_reply(format!(
                "{} chat response for: {}",
                self.provider.display_name(),
                call.query
            ))),
        }
    }

    async fn search(&self, call: SearchCall) -> Result<ModelReply, SwitchyardError> {
        match &self.backend {
            Some(backend) => {
                self.run(backend.as_ref(), "search", prompt::search_request(&call))
                    .await
            }
            None => Ok(self.placeholder_reply(format!(
                "{} search response for: {}",
                self.provider.display_name(),
                call.query
            ))),
        }
    }

    async fn summarise(&self, call: SummariseCall) -> Result<ModelReply, SwitchyardError> {
        match &self.backend {
            Some(backend) => {
                self.run(
                    backend.as_ref(),
                    "summarise",
                    prompt::summarise_request(&call),
                )
                .await
            }
            None => {
                let excerpt: String = call.content.chars().take(PLACEHOLDER_EXCERPT_CHARS).collect();
                Ok(self.placeholder_reply(format!(
                    "{} summary of content: {excerpt}...",
                    self.provider.display_name()
                )))
            }
        }
    }
}
