// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock web-search adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use switchyard_core::traits::WebSearchQuery;
use switchyard_core::{
    AdapterType, HealthStatus, PluginAdapter, SearchAdapter, SearchHit, SwitchyardError,
};

/// Returns a fixed hit list (truncated to `max_results`) or a fixed error.
pub struct MockSearch {
    hits: Vec<SearchHit>,
    failure: Option<String>,
    queries: Arc<Mutex<Vec<WebSearchQuery>>>,
}

impl MockSearch {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            failure: None,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// `count` numbered hits on example.org.
    pub fn with_hits(count: usize) -> Self {
        Self::new(
            (1..=count)
                .map(|i| SearchHit {
                    title: format!("Hit {i}"),
                    url: format!("https://example.org/{i}"),
                    snippet: format!("Snippet {i}"),
                    relevance_score: Some(1.0 / i as f64),
                })
                .collect(),
        )
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            hits: Vec::new(),
            failure: Some(message.into()),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every query received so far, oldest first.
    pub async fn queries(&self) -> Vec<WebSearchQuery> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl PluginAdapter for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::WebSearch
    }

    async fn health_check(&self) -> Result<HealthStatus, SwitchyardError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SearchAdapter for MockSearch {
    async fn search(&self, query: &WebSearchQuery) -> Result<Vec<SearchHit>, SwitchyardError> {
        self.queries.lock().await.push(query.clone());
        if let Some(message) = &self.failure {
            return Err(SwitchyardError::search(message.clone()));
        }
        Ok(self
            .hits
            .iter()
            .take(query.max_results as usize)
            .cloned()
            .collect())
    }
}
