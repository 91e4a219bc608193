// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language-model adapter for deterministic testing.
//!
//! `MockModel` implements `LanguageModelAdapter` with pre-configured replies,
//! enabling fast dispatcher and gateway tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use switchyard_core::traits::{ChatCall, ModelReply, SearchCall, SummariseCall};
use switchyard_core::types::TokenUsage;
use switchyard_core::{
    AdapterType, HealthStatus, LanguageModelAdapter, PluginAdapter, Provider, SwitchyardError,
};

/// A call observed by [`MockModel`].
#[derive(Debug, Clone)]
pub enum RecordedCall {
    Chat(ChatCall),
    Search(SearchCall),
    Summarise(SummariseCall),
}

/// Usage reported with every mock reply.
pub const MOCK_USAGE: TokenUsage = TokenUsage {
    prompt_tokens: 10,
    completion_tokens: 20,
    total_tokens: 30,
};

/// A mock language model that returns queued replies.
///
/// Replies are popped from a FIFO queue shared by all three operations.
/// When the queue is empty, `"mock <operation> response"` is returned.
pub struct MockModel {
    provider: Provider,
    replies: Arc<Mutex<VecDeque<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockModel {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            replies: Arc::new(Mutex::new(VecDeque::new())),
            failure: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock pre-loaded with the given replies.
    pub fn with_replies(provider: Provider, replies: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::new(provider)
        }
    }

    /// Create a mock whose every call fails with a provider error.
    pub fn failing(provider: Provider, message: impl Into<String>) -> Self {
        Self {
            failure: Arc::new(Mutex::new(Some(message.into()))),
            ..Self::new(provider)
        }
    }

    pub async fn add_reply(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(text.into());
    }

    /// Every call received so far, oldest first.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    async fn respond(&self, call: RecordedCall, operation: &str) -> Result<ModelReply, SwitchyardError> {
        self.calls.lock().await.push(call);
        if let Some(message) = self.failure.lock().await.clone() {
            return Err(SwitchyardError::provider(message));
        }
        let text = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| format!("mock {operation} response"));
        Ok(ModelReply {
            text,
            model: "mock-model".to_string(),
            usage: Some(MOCK_USAGE),
            placeholder: false,
        })
    }
}

#[async_trait]
impl PluginAdapter for MockModel {
    fn name(&self) -> &str {
        "mock-model"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::LanguageModel
    }

    async fn health_check(&self) -> Result<HealthStatus, SwitchyardError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl LanguageModelAdapter for MockModel {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn chat(&self, call: ChatCall) -> Result<ModelReply, SwitchyardError> {
        self.respond(RecordedCall::Chat(call), "chat").await
    }

    async fn search(&self, call: SearchCall) -> Result<ModelReply, SwitchyardError> {
        self.respond(RecordedCall::Search(call), "search").await
    }

    async fn summarise(&self, call: SummariseCall) -> Result<ModelReply, SwitchyardError> {
        self.respond(RecordedCall::Summarise(call), "summarise").await
    }
}
