// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the classifier, adapters, dispatcher and gateway.

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Free-form structured context supplied alongside a query.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// The classified purpose of a query.
///
/// Declaration order is the classifier's tie-break order: on equal scores
/// the earliest variant wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Intent {
    /// Information lookup.
    Search,
    /// Conversational exchange.
    Chat,
    /// Content condensation.
    Summarise,
}

impl Intent {
    /// All intents in tie-break order.
    pub const ALL: [Intent; 3] = [Intent::Search, Intent::Chat, Intent::Summarise];
}

/// Language-model provider selector.
///
/// A closed set resolved against the provider registry built at startup.
/// The positional aliases `primary`, `secondary` and `tertiary` are accepted
/// on input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Provider {
    #[serde(rename = "openai", alias = "primary")]
    #[strum(to_string = "openai", serialize = "primary")]
    OpenAi,
    #[serde(rename = "anthropic", alias = "secondary")]
    #[strum(to_string = "anthropic", serialize = "secondary")]
    Anthropic,
    #[serde(rename = "gemini", alias = "tertiary")]
    #[strum(to_string = "gemini", serialize = "tertiary")]
    Gemini,
}

impl Provider {
    /// All providers in registry order.
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Anthropic, Provider::Gemini];

    /// Human-facing product name, used in placeholder replies.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Gemini => "Gemini",
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but serving placeholders or experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

impl HealthStatus {
    /// Short label for status reports.
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded(_) => "degraded",
            HealthStatus::Unhealthy(_) => "unhealthy",
        }
    }
}

/// Identifies the kind of capability adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    LanguageModel,
    WebSearch,
}

/// Token accounting reported by a language-model backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One prior turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
}

/// A single ranked web-search record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

/// Web or image search.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchType {
    #[default]
    Web,
    Image,
}

/// Target length of a summary relative to its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// Fraction of the source length the summary aims for.
    pub fn multiplier(&self) -> f64 {
        match self {
            SummaryLength::Short => 0.2,
            SummaryLength::Medium => 0.4,
            SummaryLength::Long => 0.6,
        }
    }

    /// Parse a caller-supplied value, falling back to `medium` when unknown.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(SummaryLength::Medium)
    }
}

impl<'de> Deserialize<'de> for SummaryLength {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

/// Layout of a summary.
///
/// Requests that omit the style get `bullet_points`; unrecognized styles
/// fall back to `paragraph`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SummaryStyle {
    Paragraph,
    #[default]
    BulletPoints,
    KeyPoints,
}

impl SummaryStyle {
    /// Parse a caller-supplied value, falling back to `paragraph` when unknown.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(SummaryStyle::Paragraph)
    }
}

impl<'de> Deserialize<'de> for SummaryStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

/// Normalized per-intent scores. Diagnostic only; routing uses the top intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceDistribution {
    pub search: f64,
    pub chat: f64,
    pub summarise: f64,
}

impl ConfidenceDistribution {
    /// Score for a single intent.
    pub fn get(&self, intent: Intent) -> f64 {
        match intent {
            Intent::Search => self.search,
            Intent::Chat => self.chat,
            Intent::Summarise => self.summarise,
        }
    }

    /// Sum of all scores; 1.0 within floating tolerance.
    pub fn total(&self) -> f64 {
        self.search + self.chat + self.summarise
    }
}

/// Result of the diagnostic classify operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub query: String,
    pub classified_type: Intent,
    pub confidence_scores: ConfidenceDistribution,
}
