// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Non-model capabilities used by the dispatcher: the local summariser and
//! the web-search backend.

pub mod summariser;
pub mod web_search;

pub use summariser::{LocalSummariser, LocalSummary};
pub use web_search::GoogleSearch;
