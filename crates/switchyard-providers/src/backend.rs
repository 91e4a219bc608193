// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider-neutral completion call shared by the HTTP backends.

use async_trait::async_trait;
use switchyard_core::types::{ChatMessage, TokenUsage};
use switchyard_core::SwitchyardError;

/// One completion request in provider-neutral form.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    /// Turns in order; the last one is the new user message.
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Text produced by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

/// A vendor API that turns a [`CompletionRequest`] into text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, SwitchyardError>;
}
