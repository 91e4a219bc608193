// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, sampling ranges, and result-count bounds.

use crate::diagnostic::ConfigError;
use crate::model::{SwitchyardConfig, SEARCH_BACKEND_MAX_RESULTS};

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SwitchyardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(invalid("server.host must not be empty".to_string()));
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(invalid(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.server.port == 0 {
        errors.push(invalid("server.port must be non-zero".to_string()));
    }

    if config.routing.request_timeout_secs == 0 {
        errors.push(invalid(
            "routing.request_timeout_secs must be at least 1".to_string(),
        ));
    }

    let temperature = config.chat.default_temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(invalid(format!(
            "chat.default_temperature must be between 0.0 and 2.0, got {temperature}"
        )));
    }

    if config.chat.default_max_tokens == 0 {
        errors.push(invalid("chat.default_max_tokens must be at least 1".to_string()));
    }

    let search = &config.search;
    for (key, value) in [
        ("search.default_max_results", search.default_max_results),
        ("search.max_results_cap", search.max_results_cap),
    ] {
        if !(1..=SEARCH_BACKEND_MAX_RESULTS).contains(&value) {
            errors.push(invalid(format!(
                "{key} must be between 1 and {SEARCH_BACKEND_MAX_RESULTS}, got {value}"
            )));
        }
    }
    if search.default_max_results > search.max_results_cap {
        errors.push(invalid(format!(
            "search.default_max_results ({}) must not exceed search.max_results_cap ({})",
            search.default_max_results, search.max_results_cap
        )));
    }

    for (key, url) in [
        ("openai.base_url", &config.openai.base_url),
        ("anthropic.base_url", &config.anthropic.base_url),
        ("gemini.base_url", &config.gemini.base_url),
        ("search.base_url", &config.search.base_url),
    ] {
        if url.trim().is_empty() {
            errors.push(invalid(format!("{key} must not be empty")));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation { message }
}
