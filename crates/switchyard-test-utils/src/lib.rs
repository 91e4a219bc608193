// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Switchyard.
//!
//! Mock adapters that stand in for language-model and web-search backends.

pub mod mock_model;
pub mod mock_search;

pub use mock_model::{MockModel, RecordedCall, MOCK_USAGE};
pub use mock_search::MockSearch;
