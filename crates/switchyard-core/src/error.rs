// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Switchyard.

use thiserror::Error;

/// The primary error type used across adapter traits and the dispatcher.
///
/// Only [`SwitchyardError::InvalidRequest`] is meant to reach a caller as a
/// distinct error. Every other variant is folded into a failure envelope at
/// the dispatch boundary.
#[derive(Debug, Error)]
pub enum SwitchyardError {
    /// Configuration errors (invalid values, unusable credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// Language-model provider errors (HTTP failure, API error, malformed reply).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Web-search backend errors.
    #[error("search error: {message}")]
    Search {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed caller input, e.g. summarisation without any content.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Requested adapter was not found in the registry.
    #[error("adapter not found: {adapter_type}/{name}")]
    AdapterNotFound { adapter_type: String, name: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors, including local computation failures.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SwitchyardError {
    /// Whether the error was caused by the caller's input rather than by a
    /// backend or by Switchyard itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SwitchyardError::InvalidRequest(_))
    }

    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        SwitchyardError::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a search error without an underlying source.
    pub fn search(message: impl Into<String>) -> Self {
        SwitchyardError::Search {
            message: message.into(),
            source: None,
        }
    }
}
