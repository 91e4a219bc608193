// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./switchyard.toml` > `~/.config/switchyard/switchyard.toml`
//! > `/etc/switchyard/switchyard.toml`, with environment variable overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SwitchyardConfig;

/// Conventional credential variables and the keys they map to.
const CONVENTIONAL_ENV: &[(&str, &str)] = &[
    ("openai_api_key", "openai.api_key"),
    ("anthropic_api_key", "anthropic.api_key"),
    ("gemini_api_key", "gemini.api_key"),
    ("search_api_key", "search.api_key"),
    ("search_engine_id", "search.engine_id"),
    ("port", "server.port"),
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/switchyard/switchyard.toml` (system-wide)
/// 3. `~/.config/switchyard/switchyard.toml` (user XDG config)
/// 4. `./switchyard.toml` (local directory)
/// 5. Conventional variables (`OPENAI_API_KEY`, `PORT`, ...)
/// 6. `SWITCHYARD_*` environment variables
pub fn load_config() -> Result<SwitchyardConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SwitchyardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SwitchyardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SwitchyardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SwitchyardConfig::default()))
        .merge(Toml::file(path))
        .merge(conventional_env_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SwitchyardConfig::default()))
        .merge(Toml::file("/etc/switchyard/switchyard.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("switchyard/switchyard.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("switchyard.toml"))
        .merge(conventional_env_provider())
        .merge(env_provider())
}

/// Unprefixed variables commonly set by deployment platforms and SDK docs.
fn conventional_env_provider() -> Env {
    let names: Vec<&str> = CONVENTIONAL_ENV.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        let lower = key.as_str().to_ascii_lowercase();
        CONVENTIONAL_ENV
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, target)| target.to_string())
            .unwrap_or(lower)
            .into()
    })
}

/// Create the `SWITCHYARD_` provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// keys stay intact: `SWITCHYARD_SEARCH_MAX_RESULTS_CAP` must map to
/// `search.max_results_cap`, not `search.max.results.cap`.
fn env_provider() -> Env {
    Env::prefixed("SWITCHYARD_").map(|key| {
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = ["server", "routing", "chat", "openai", "anthropic", "gemini", "search"]
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(&format!("{section}_"))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key_str);
        mapped.into()
    })
}
