// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound request shapes for the direct and auto-routed entry points.
//!
//! Defaults left as `None` here (temperature, max tokens, result count) are
//! resolved by the dispatcher from configuration.

use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, Context, Provider, SearchType, SummaryLength, SummaryStyle};

/// Context key whose non-empty string value forces summarisation.
pub const CONTENT_KEY: &str = "content";

/// Generic query for the auto-routed entry point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoRequest {
    pub query: String,
    #[serde(default, rename = "llm_provider", alias = "provider")]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub context: Option<Context>,
}

impl AutoRequest {
    /// The embedded content string, if context carries a non-empty one.
    /// Whitespace counts as content.
    pub fn embedded_content(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|ctx| ctx.get(CONTENT_KEY))
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Conversational request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default, rename = "llm_provider", alias = "provider")]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub context: Option<Context>,
    #[serde(default)]
    pub conversation_history: Option<Vec<ChatMessage>>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// Information lookup request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, rename = "llm_provider", alias = "provider")]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub context: Option<Context>,
    #[serde(default)]
    pub search_type: SearchType,
    #[serde(default)]
    pub max_results: Option<u32>,
    /// Whether to ask a language model for a narrative over the results.
    #[serde(default = "default_include_summary")]
    pub include_summary: bool,
    /// Geolocation hint passed through to the search backend.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub search_images: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            provider: None,
            context: None,
            search_type: SearchType::Web,
            max_results: None,
            include_summary: default_include_summary(),
            location: None,
            search_images: false,
        }
    }
}

fn default_include_summary() -> bool {
    true
}

/// Content condensation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummariseRequest {
    /// Optional instruction text accompanying the content.
    #[serde(default)]
    pub query: String,
    pub content: String,
    #[serde(default, rename = "llm_provider", alias = "provider")]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub context: Option<Context>,
    #[serde(default, alias = "length")]
    pub summary_length: SummaryLength,
    #[serde(default, alias = "style")]
    pub summary_style: SummaryStyle,
}
