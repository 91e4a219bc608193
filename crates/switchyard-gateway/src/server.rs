// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use switchyard_config::model::ServerConfig;
use switchyard_core::SwitchyardError;
use switchyard_router::Dispatcher;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub dispatcher: Arc<Dispatcher>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            start_time: Instant::now(),
        }
    }
}

/// All gateway routes with CORS and request tracing applied.
///
/// - GET  /, /health
/// - GET  /api/v1/health, /api/v1/classify?query=
/// - POST /api/v1/chat, /api/v1/search, /api/v1/summarise, /api/v1/auto
pub fn build_router(state: GatewayState, allowed_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/chat", post(handlers::post_chat))
        .route("/search", post(handlers::post_search))
        .route("/summarise", post(handlers::post_summarise))
        .route("/auto", post(handlers::post_auto))
        .route("/classify", get(handlers::get_classify));

    Router::new()
        .route("/", get(handlers::get_index))
        .route("/health", get(handlers::get_public_health))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy from the configured origin list. `"*"` allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    if allowed_origins.iter().any(|o| o.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Start the gateway HTTP server and serve until Ctrl-C.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), SwitchyardError> {
    let app = build_router(state, &config.allowed_origins);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SwitchyardError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SwitchyardError::Internal(format!("gateway server error: {e}")))?;

    info!("Gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
