// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web-search adapter trait.

use async_trait::async_trait;

use crate::error::SwitchyardError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{SearchHit, SearchType};

/// Parameters for one web search.
#[derive(Debug, Clone)]
pub struct WebSearchQuery {
    pub query: String,
    /// Already clamped to the backend maximum by the caller.
    pub max_results: u32,
    pub search_type: SearchType,
    pub location: Option<String>,
}

/// Ranked results plus the backend's own narrative.
#[derive(Debug, Clone, PartialEq)]
pub struct WebSearchOutcome {
    pub results: Vec<SearchHit>,
    pub narrative: String,
}

/// Adapter for a web-search backend.
#[async_trait]
pub trait SearchAdapter: PluginAdapter {
    /// Returns ranked records for the query.
    async fn search(&self, query: &WebSearchQuery) -> Result<Vec<SearchHit>, SwitchyardError>;

    /// Searches and attaches a short narrative describing the result set.
    async fn search_with_summary(
        &self,
        query: &WebSearchQuery,
    ) -> Result<WebSearchOutcome, SwitchyardError> {
        let results = self.search(query).await?;
        let narrative = format!(
            "Found {} results for '{}'. The top results discuss various aspects of the topic.",
            results.len(),
            query.query
        );
        Ok(WebSearchOutcome { results, narrative })
    }
}
