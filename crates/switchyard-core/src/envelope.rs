// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Uniform response envelopes.
//!
//! Every dispatch path, successful or not, produces an [`Envelope`] whose
//! header (outcome, message, provider, timing, timestamp) is identical across
//! intents. The intent-specific payload is flattened into the same object on
//! the wire.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Intent, Provider, SearchHit, TokenUsage};

/// Response envelope with a common header and an intent-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<P> {
    /// Outcome flag.
    pub success: bool,
    /// Human-readable message, populated only on failure.
    pub message: Option<String>,
    /// Creation time of the envelope.
    pub timestamp: DateTime<Utc>,
    /// Provider used, or that would have been used on failure.
    #[serde(rename = "llm_provider")]
    pub provider: String,
    /// Elapsed wall time for the request.
    pub processing_time_ms: f64,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Envelope<P> {
    /// Successful envelope.
    pub fn succeeded(provider: Provider, elapsed: Duration, payload: P) -> Self {
        Self {
            success: true,
            message: None,
            timestamp: Utc::now(),
            provider: provider.to_string(),
            processing_time_ms: duration_ms(elapsed),
            payload,
        }
    }

    /// Failure envelope. `payload` must be the intent's empty shape.
    pub fn failed(provider: Provider, elapsed: Duration, message: String, payload: P) -> Self {
        Self {
            success: false,
            message: Some(message),
            timestamp: Utc::now(),
            provider: provider.to_string(),
            processing_time_ms: duration_ms(elapsed),
            payload,
        }
    }
}

fn duration_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Payload of a chat envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub response: String,
    /// Reserved for conversation tracking; never populated.
    pub conversation_id: Option<String>,
    pub usage_stats: Option<TokenUsage>,
}

/// Payload of a search envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub results: Vec<SearchHit>,
    pub total_results: usize,
    /// Echo of the query, present even on failure.
    pub search_query: String,
    pub summary: Option<String>,
}

impl SearchPayload {
    /// The failure shape: no results, only the echoed query.
    pub fn empty(search_query: impl Into<String>) -> Self {
        Self {
            search_query: search_query.into(),
            ..Self::default()
        }
    }
}

/// Payload of a summarise envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarisePayload {
    pub summary: String,
    /// Character count of the submitted content.
    pub original_length: usize,
    /// Character count of the returned summary.
    pub summary_length: usize,
    /// Ratio from the local condensation, not from the returned summary.
    pub compression_ratio: Option<f64>,
    pub key_points: Option<Vec<String>>,
}

impl SummarisePayload {
    /// The failure shape: empty summary, only the input length.
    pub fn empty(original_length: usize) -> Self {
        Self {
            original_length,
            ..Self::default()
        }
    }
}

pub type ChatEnvelope = Envelope<ChatPayload>;
pub type SearchEnvelope = Envelope<SearchPayload>;
pub type SummariseEnvelope = Envelope<SummarisePayload>;

/// Envelope produced by the auto-routed entry point, keyed by served intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "lowercase")]
pub enum RoutedEnvelope {
    Chat(ChatEnvelope),
    Search(SearchEnvelope),
    Summarise(SummariseEnvelope),
}

impl RoutedEnvelope {
    /// Intent that was actually served.
    pub fn intent(&self) -> Intent {
        match self {
            RoutedEnvelope::Chat(_) => Intent::Chat,
            RoutedEnvelope::Search(_) => Intent::Search,
            RoutedEnvelope::Summarise(_) => Intent::Summarise,
        }
    }

    pub fn success(&self) -> bool {
        match self {
            RoutedEnvelope::Chat(e) => e.success,
            RoutedEnvelope::Search(e) => e.success,
            RoutedEnvelope::Summarise(e) => e.success,
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            RoutedEnvelope::Chat(e) => &e.provider,
            RoutedEnvelope::Search(e) => &e.provider,
            RoutedEnvelope::Summarise(e) => &e.provider,
        }
    }

    pub fn processing_time_ms(&self) -> f64 {
        match self {
            RoutedEnvelope::Chat(e) => e.processing_time_ms,
            RoutedEnvelope::Search(e) => e.processing_time_ms,
            RoutedEnvelope::Summarise(e) => e.processing_time_ms,
        }
    }
}
