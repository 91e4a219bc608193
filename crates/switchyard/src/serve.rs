// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `switchyard serve` implementation.
//!
//! Wires the provider registry, the search backend and the dispatcher into
//! the gateway, then serves until shutdown.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use switchyard_config::SwitchyardConfig;
use switchyard_core::SwitchyardError;
use switchyard_gateway::{start_server, GatewayState};
use switchyard_providers::ProviderRegistry;
use switchyard_router::{DispatchSettings, Dispatcher};
use switchyard_security::{RedactingWriter, SecretValues};
use switchyard_tools::GoogleSearch;
use tracing::{info, warn};

/// Runs the `serve` command.
pub async fn run_serve(config: SwitchyardConfig) -> Result<(), SwitchyardError> {
    let secrets: SecretValues = Arc::new(RwLock::new(config.secret_values()));
    init_tracing(&config.server.log_level, secrets);

    info!(
        environment = %config.server.environment,
        default_provider = %config.routing.default_provider,
        "starting switchyard serve"
    );

    let state = build_state(&config)?;
    start_server(&config.server, state).await
}

/// Builds the shared gateway state from configuration.
pub fn build_state(config: &SwitchyardConfig) -> Result<GatewayState, SwitchyardError> {
    let timeout = Duration::from_secs(config.routing.request_timeout_secs);

    let registry = ProviderRegistry::from_config(config)?;
    let search = GoogleSearch::new(&config.search, timeout)?;
    if !search.is_configured() {
        warn!("search backend not configured, serving placeholder results");
    }

    let dispatcher = Dispatcher::new(
        Arc::new(registry),
        Arc::new(search),
        DispatchSettings::from_config(config),
    )
    .with_secrets(config.secret_values());

    Ok(GatewayState::new(Arc::new(dispatcher)))
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level;
/// every line passes through secret redaction on its way to stderr.
fn init_tracing(log_level: &str, secrets: SecretValues) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("switchyard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), secrets.clone()))
        .init();
}
