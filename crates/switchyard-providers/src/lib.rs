// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language-model providers for Switchyard.
//!
//! Each provider slot (OpenAI, Anthropic, Gemini) is served by a
//! [`ModelAdapter`]. Slots with an API key talk to the vendor's HTTP API;
//! slots without one answer with clearly labelled placeholder replies.

pub mod adapter;
pub mod anthropic;
pub mod backend;
pub mod gemini;
mod http;
pub mod openai;
pub mod prompt;
pub mod registry;

pub use adapter::ModelAdapter;
pub use backend::{Completion, CompletionBackend, CompletionRequest};
pub use registry::ProviderRegistry;
