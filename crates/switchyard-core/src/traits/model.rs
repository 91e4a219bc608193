// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language-model adapter trait.

use async_trait::async_trait;

use crate::error::SwitchyardError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatMessage, Context, Provider, TokenUsage};

/// A conversational call.
#[derive(Debug, Clone)]
pub struct ChatCall {
    pub query: String,
    pub context: Option<Context>,
    /// Prior turns, oldest first.
    pub history: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A narrative request over search results (`context.search_results`).
#[derive(Debug, Clone)]
pub struct SearchCall {
    pub query: String,
    pub context: Option<Context>,
}

/// A refinement request for a piece of content.
///
/// `context` carries `summary_length`, `summary_style` and `local_summary`.
#[derive(Debug, Clone)]
pub struct SummariseCall {
    pub content: String,
    pub context: Option<Context>,
}

/// Free text returned by a language model, plus optional accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReply {
    pub text: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
    /// True when the adapter had no credentials and produced a stand-in.
    pub placeholder: bool,
}

/// Adapter for a language-model backend.
///
/// Implementations either return a well-formed reply or a reportable error
/// within a bounded time. Unconfigured providers return placeholder replies
/// instead of failing.
#[async_trait]
pub trait LanguageModelAdapter: PluginAdapter {
    /// Which provider slot this adapter serves.
    fn provider(&self) -> Provider;

    async fn chat(&self, call: ChatCall) -> Result<ModelReply, SwitchyardError>;

    async fn search(&self, call: SearchCall) -> Result<ModelReply, SwitchyardError>;

    async fn summarise(&self, call: SummariseCall) -> Result<ModelReply, SwitchyardError>;
}
