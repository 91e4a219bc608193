// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web search through the Google Custom Search JSON API.
//!
//! Without both an API key and an engine id the backend serves placeholder
//! records so the search path stays usable in development.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use switchyard_config::model::{SearchConfig, SEARCH_BACKEND_MAX_RESULTS};
use switchyard_core::traits::search::WebSearchQuery;
use switchyard_core::{
    AdapterType, HealthStatus, PluginAdapter, SearchAdapter, SearchHit, SearchType,
    SwitchyardError,
};
use tracing::debug;

/// Most placeholder records returned for one query.
const PLACEHOLDER_RESULTS: u32 = 5;

#[derive(Debug, Clone)]
struct Credentials {
    api_key: String,
    engine_id: String,
}

/// Google Custom Search backend.
#[derive(Debug, Clone)]
pub struct GoogleSearch {
    client: reqwest::Client,
    credentials: Option<Credentials>,
    base_url: String,
    timeout: Duration,
}

impl GoogleSearch {
    pub fn new(config: &SearchConfig, timeout: Duration) -> Result<Self, SwitchyardError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SwitchyardError::Search {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let credentials = match (&config.api_key, &config.engine_id) {
            (Some(api_key), Some(engine_id)) if !api_key.is_empty() && !engine_id.is_empty() => {
                Some(Credentials {
                    api_key: api_key.clone(),
                    engine_id: engine_id.clone(),
                })
            }
            _ => None,
        };

        Ok(Self {
            client,
            credentials,
            base_url: config.base_url.clone(),
            timeout,
        })
    }

    /// Whether real searches will be issued.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn fetch(
        &self,
        credentials: &Credentials,
        query: &WebSearchQuery,
    ) -> Result<Vec<SearchHit>, SwitchyardError> {
        let num = query.max_results.min(SEARCH_BACKEND_MAX_RESULTS).to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("key", credentials.api_key.as_str()),
            ("cx", credentials.engine_id.as_str()),
            ("q", query.query.as_str()),
            ("num", num.as_str()),
        ];
        if query.search_type == SearchType::Image {
            params.push(("searchType", "image"));
        }
        if let Some(location) = query.location.as_deref() {
            params.push(("gl", location));
        }

        let url = reqwest::Url::parse_with_params(&self.base_url, &params).map_err(|e| {
            SwitchyardError::Search {
                message: format!("invalid search base URL: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SwitchyardError::Timeout {
                    duration: self.timeout,
                }
            } else {
                SwitchyardError::Search {
                    message: format!("HTTP request failed: {}", e.without_url()),
                    source: None,
                }
            }
        })?;

        let status = response.status();
        debug!(status = %status, "search response received");
        let body = response.text().await.map_err(|e| SwitchyardError::Search {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "search API error ({}): {}",
                    api_err.error.code, api_err.error.message
                ),
                Err(_) => format!("search API returned {status}: {body}"),
            };
            return Err(SwitchyardError::search(message));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SwitchyardError::Search {
                message: format!("failed to parse search response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(parsed
            .items
            .into_iter()
            .map(|item| SearchHit {
                title: item.title,
                url: item.link,
                snippet: item.snippet,
                relevance_score: None,
            })
            .collect())
    }
}

/// Stand-in records used when the backend is unconfigured.
pub fn placeholder_results(query: &str, max_results: u32) -> Vec<SearchHit> {
    (0..max_results.min(PLACEHOLDER_RESULTS))
        .map(|i| {
            let n = i + 1;
            SearchHit {
                title: format!("Result {n} for '{query}'"),
                url: format!("https://example.com/result-{n}"),
                snippet: format!("This is a mock search result snippet for query: {query}"),
                relevance_score: Some(0.9 - f64::from(i) * 0.1),
            }
        })
        .collect()
}

#[async_trait]
impl PluginAdapter for GoogleSearch {
    fn name(&self) -> &str {
        "google-custom-search"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::WebSearch
    }

    async fn health_check(&self) -> Result<HealthStatus, SwitchyardError> {
        if self.is_configured() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Degraded(
                "search API key or engine id not configured; serving placeholder results".into(),
            ))
        }
    }
}

#[async_trait]
impl SearchAdapter for GoogleSearch {
    async fn search(&self, query: &WebSearchQuery) -> Result<Vec<SearchHit>, SwitchyardError> {
        match &self.credentials {
            Some(credentials) if query.max_results > 0 => self.fetch(credentials, query).await,
            Some(_) => Ok(Vec::new()),
            None => Ok(placeholder_results(&query.query, query.max_results)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: u16,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query(q: &str, max_results: u32) -> WebSearchQuery {
        WebSearchQuery {
            query: q.to_string(),
            max_results,
            search_type: SearchType::Web,
            location: None,
        }
    }

    fn configured(base_url: String) -> GoogleSearch {
        let config = SearchConfig {
            api_key: Some("search-key".into()),
            engine_id: Some("engine-1".into()),
            base_url,
            ..SearchConfig::default()
        };
        GoogleSearch::new(&config, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn placeholder_results_are_capped_at_five() {
        let hits = placeholder_results("rust", 10);
        assert_eq!(hits.len(), 5);
        assert_eq!(hits[0].title, "Result 1 for 'rust'");
        assert_eq!(hits[4].url, "https://example.com/result-5");
        assert!((hits[4].relevance_score.unwrap() - 0.5).abs() < 1e-9);
        assert_eq!(placeholder_results("rust", 2).len(), 2);
    }

    #[tokio::test]
    async fn unconfigured_backend_serves_placeholders() {
        let search = GoogleSearch::new(&SearchConfig::default(), Duration::from_secs(5)).unwrap();
        assert!(!search.is_configured());
        let outcome = search.search_with_summary(&query("tokio", 3)).await.unwrap();
        assert_eq!(outcome.results.len(), 3);
        assert_eq!(
            outcome.narrative,
            "Found 3 results for 'tokio'. The top results discuss various aspects of the topic."
        );
        let health = search.health_check().await.unwrap();
        assert_eq!(health.label(), "degraded");
    }

    #[tokio::test]
    async fn configured_backend_calls_custom_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("key", "search-key"))
            .and(query_param("cx", "engine-1"))
            .and(query_param("q", "rust async"))
            .and(query_param("num", "2"))
            .and(query_param_is_missing("searchType"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"title": "Tokio", "link": "https://tokio.rs", "snippet": "An async runtime"},
                    {"title": "async-std", "link": "https://async.rs", "snippet": "Another runtime"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let search = configured(server.uri());
        let hits = search.search(&query("rust async", 2)).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Tokio");
        assert_eq!(hits[0].url, "https://tokio.rs");
        assert!(hits[0].relevance_score.is_none());
        assert_eq!(search.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn image_mode_and_location_are_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("searchType", "image"))
            .and(query_param("gl", "uk"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let search = configured(server.uri());
        let q = WebSearchQuery {
            search_type: SearchType::Image,
            location: Some("uk".into()),
            ..query("red pandas", 4)
        };
        let hits = search.search(&q).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn api_error_is_reported_without_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"code": 403, "message": "Daily limit exceeded"}
            })))
            .mount(&server)
            .await;

        let search = configured(server.uri());
        let err = search.search(&query("rust", 5)).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("search API error (403): Daily limit exceeded"), "got: {msg}");
        assert!(!msg.contains("search-key"));
    }
}
