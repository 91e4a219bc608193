// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability adapter traits.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` so they can be held as trait objects in the registry.

pub mod adapter;
pub mod model;
pub mod search;

pub use adapter::PluginAdapter;
pub use model::{ChatCall, LanguageModelAdapter, ModelReply, SearchCall, SummariseCall};
pub use search::{SearchAdapter, WebSearchOutcome, WebSearchQuery};
