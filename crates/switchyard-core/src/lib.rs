// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Switchyard.
//!
//! Provides the error type, the request and envelope types, and the
//! capability adapter traits shared by every other crate in the workspace.

pub mod envelope;
pub mod error;
pub mod request;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use envelope::{
    ChatEnvelope, ChatPayload, Envelope, RoutedEnvelope, SearchEnvelope, SearchPayload,
    SummariseEnvelope, SummarisePayload,
};
pub use error::SwitchyardError;
pub use request::{AutoRequest, ChatRequest, SearchRequest, SummariseRequest};
pub use traits::{LanguageModelAdapter, PluginAdapter, SearchAdapter};
pub use types::{
    AdapterType, ClassificationReport, ConfidenceDistribution, Context, HealthStatus, Intent,
    Provider, SearchHit, SearchType, SummaryLength, SummaryStyle, TokenUsage,
};
