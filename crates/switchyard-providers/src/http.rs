// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared JSON-over-HTTP client for provider backends.
//!
//! Handles authentication headers, the per-call timeout, and a single retry
//! on transient status codes (429, 500, 503, 529).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use switchyard_core::SwitchyardError;
use tracing::{debug, warn};

/// Extracts a readable message from a provider's error body.
pub(crate) type ErrorParser = fn(&str) -> Option<String>;

#[derive(Debug, Clone)]
pub(crate) struct JsonClient {
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl JsonClient {
    pub(crate) fn new(
        headers: &[(&'static str, &str)],
        timeout: Duration,
    ) -> Result<Self, SwitchyardError> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let value = HeaderValue::from_str(value).map_err(|e| {
                SwitchyardError::Config(format!("invalid `{name}` header value: {e}"))
            })?;
            map.insert(*name, value);
        }
        map.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(map)
            .timeout(timeout)
            .build()
            .map_err(|e| SwitchyardError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            timeout,
            max_retries: 1,
            retry_delay: Duration::from_secs(1),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// POSTs `body` and decodes a successful response as `R`.
    pub(crate) async fn post_json<B, R>(
        &self,
        url: &str,
        body: &B,
        parse_error: ErrorParser,
    ) -> Result<R, SwitchyardError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying provider request after transient error");
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = self
                .client
                .post(url)
                .json(body)
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            let status = response.status();
            debug!(status = %status, attempt, "provider response received");

            let text = response
                .text()
                .await
                .map_err(|e| self.transport_error(e))?;

            if status.is_success() {
                return serde_json::from_str(&text).map_err(|e| SwitchyardError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            let message = parse_error(&text).unwrap_or_else(|| format!("API returned {status}: {text}"));

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient error, will retry");
                last_error = Some(SwitchyardError::provider(message));
                continue;
            }

            return Err(SwitchyardError::provider(message));
        }

        Err(last_error.unwrap_or_else(|| SwitchyardError::provider("request failed after retries")))
    }

    fn transport_error(&self, e: reqwest::Error) -> SwitchyardError {
        if e.is_timeout() {
            SwitchyardError::Timeout {
                duration: self.timeout,
            }
        } else {
            SwitchyardError::provider(format!("HTTP request failed: {}", e.without_url()))
        }
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}

/// Joins a configured base URL and an API path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Pong {
        ok: bool,
    }

    fn parse_none(_: &str) -> Option<String> {
        None
    }

    fn client() -> JsonClient {
        JsonClient::new(&[("x-test-key", "k1")], Duration::from_secs(5))
            .unwrap()
            .with_retry_delay(Duration::from_millis(10))
    }

    #[test]
    fn endpoint_joins_cleanly() {
        assert_eq!(endpoint("http://h/", "/v1/x"), "http://h/v1/x");
        assert_eq!(endpoint("http://h", "v1/x"), "http://h/v1/x");
    }

    #[test]
    fn transient_statuses() {
        for code in [429u16, 500, 503, 529] {
            assert!(is_transient_error(reqwest::StatusCode::from_u16(code).unwrap()));
        }
        assert!(!is_transient_error(reqwest::StatusCode::BAD_REQUEST));
        assert!(!is_transient_error(reqwest::StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn sends_default_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ping"))
            .and(header("x-test-key", "k1"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let url = endpoint(&server.uri(), "ping");
        let pong: Pong = client()
            .post_json(&url, &serde_json::json!({}), parse_none)
            .await
            .unwrap();
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn retries_once_on_503_then_gives_up() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(2)
            .mount(&server)
            .await;

        let err = client()
            .post_json::<_, Pong>(&server.uri(), &serde_json::json!({}), parse_none)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("503"), "got: {err}");
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
            .expect(1)
            .mount(&server)
            .await;

        let result = client()
            .post_json::<_, Pong>(&server.uri(), &serde_json::json!({}), parse_none)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn slow_backend_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = JsonClient::new(&[], Duration::from_millis(50)).unwrap();
        let err = client
            .post_json::<_, Pong>(&server.uri(), &serde_json::json!({}), parse_none)
            .await
            .unwrap_err();
        assert!(matches!(err, SwitchyardError::Timeout { .. }), "got: {err:?}");
    }
}
