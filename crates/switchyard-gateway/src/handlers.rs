// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Dispatch handlers always answer 200 with an envelope, whatever the
//! adapter outcome. Only a malformed body (rejected by the extractor) or an
//! auto-routed summarise request without content produce an error status.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use switchyard_core::{
    AutoRequest, ChatEnvelope, ChatRequest, ClassificationReport, SearchEnvelope, SearchRequest,
    SummariseEnvelope, SummariseRequest, SwitchyardError,
};
use tracing::error;

use crate::server::GatewayState;

const SERVICE_NAME: &str = "switchyard";

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub version: String,
    /// Endpoint name to path.
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct PublicHealthResponse {
    pub status: String,
}

/// Response body for GET /api/v1/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Per-provider adapter status (`healthy`, `degraded`, `unhealthy`).
    pub providers: BTreeMap<String, String>,
    /// Search backend status.
    pub search: String,
}

/// Query string for GET /api/v1/classify.
#[derive(Debug, Deserialize)]
pub struct ClassifyParams {
    pub query: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// GET /
pub async fn get_index() -> Json<IndexResponse> {
    let endpoints = BTreeMap::from([
        ("health", "/api/v1/health"),
        ("chat", "/api/v1/chat"),
        ("search", "/api/v1/search"),
        ("summarise", "/api/v1/summarise"),
        ("auto", "/api/v1/auto"),
        ("classify", "/api/v1/classify"),
    ]);
    Json(IndexResponse {
        message: "Switchyard query router".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// GET /health
///
/// Liveness probe; does not touch any adapter.
pub async fn get_public_health() -> Json<PublicHealthResponse> {
    Json(PublicHealthResponse {
        status: "healthy".to_string(),
    })
}

/// GET /api/v1/health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let providers = state
        .dispatcher
        .providers()
        .health()
        .await
        .into_iter()
        .map(|(provider, status)| (provider.to_string(), status.label().to_string()))
        .collect();
    let search = match state.dispatcher.search_backend().health_check().await {
        Ok(status) => status.label().to_string(),
        Err(_) => "unhealthy".to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        providers,
        search,
    })
}

/// POST /api/v1/chat
pub async fn post_chat(
    State(state): State<GatewayState>,
    Json(body): Json<ChatRequest>,
) -> Json<ChatEnvelope> {
    Json(state.dispatcher.chat(body).await)
}

/// POST /api/v1/search
pub async fn post_search(
    State(state): State<GatewayState>,
    Json(body): Json<SearchRequest>,
) -> Json<SearchEnvelope> {
    Json(state.dispatcher.search(body).await)
}

/// POST /api/v1/summarise
pub async fn post_summarise(
    State(state): State<GatewayState>,
    Json(body): Json<SummariseRequest>,
) -> Json<SummariseEnvelope> {
    Json(state.dispatcher.summarise(body).await)
}

/// POST /api/v1/auto
///
/// The response body carries an `intent` field naming the intent served.
pub async fn post_auto(
    State(state): State<GatewayState>,
    Json(body): Json<AutoRequest>,
) -> Response {
    match state.dispatcher.auto(body).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(SwitchyardError::InvalidRequest(message)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse { error: message }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "auto routing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/v1/classify?query=
pub async fn get_classify(
    State(state): State<GatewayState>,
    Query(params): Query<ClassifyParams>,
) -> Json<ClassificationReport> {
    Json(state.dispatcher.classify(&params.query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_params_deserialize() {
        let params: ClassifyParams = serde_json::from_str(r#"{"query": "what is rust"}"#).unwrap();
        assert_eq!(params.query, "what is rust");
    }

    #[test]
    fn error_response_serializes() {
        let json = serde_json::to_value(ErrorResponse {
            error: "nope".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"error": "nope"}));
    }

    #[tokio::test]
    async fn index_lists_every_endpoint() {
        let Json(index) = get_index().await;
        assert_eq!(index.endpoints.len(), 6);
        assert_eq!(index.endpoints["classify"], "/api/v1/classify");
    }
}
