// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Switchyard.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use switchyard_core::Provider;

/// Top-level Switchyard configuration.
///
/// All sections are optional and default to values that run the service
/// without any credentials (placeholder mode).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchyardConfig {
    /// HTTP listener and logging.
    #[serde(default)]
    pub server: ServerConfig,

    /// Provider selection and call bounds.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Chat request defaults.
    #[serde(default)]
    pub chat: ChatConfig,

    /// OpenAI API settings (the primary provider slot).
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Anthropic API settings (the secondary provider slot).
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Gemini API settings (the tertiary provider slot).
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Web-search backend settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind. The bare `PORT` env var also maps here.
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins. `"*"` allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Deployment environment name, reported by the service index.
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
            log_level: default_log_level(),
            environment: default_environment(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

/// Provider selection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Provider used when a request does not name one.
    #[serde(default = "default_provider")]
    pub default_provider: Provider,

    /// Upper bound on a single backend HTTP call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_provider() -> Provider {
    Provider::OpenAi
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Defaults applied to chat requests that omit sampling parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` serves placeholder replies. `OPENAI_API_KEY` also maps here.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_model")]
    pub model: String,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            base_url: default_openai_base_url(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// API key. `None` serves placeholder replies. `ANTHROPIC_API_KEY` also maps here.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// Anthropic API version header value.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_anthropic_model(),
            api_version: default_api_version(),
            base_url: default_anthropic_base_url(),
        }
    }
}

fn default_anthropic_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` serves placeholder replies. `GEMINI_API_KEY` also maps here.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub model: String,

    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

/// Web-search backend configuration (Google Custom Search).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// API key. `SEARCH_API_KEY` also maps here.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Programmable search engine id. `SEARCH_ENGINE_ID` also maps here.
    #[serde(default)]
    pub engine_id: Option<String>,

    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    /// Result count used when a request does not specify one.
    #[serde(default = "default_max_results")]
    pub default_max_results: u32,

    /// Hard cap on results per request (the backend serves at most 10).
    #[serde(default = "default_max_results_cap")]
    pub max_results_cap: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            engine_id: None,
            base_url: default_search_base_url(),
            default_max_results: default_max_results(),
            max_results_cap: default_max_results_cap(),
        }
    }
}

/// Most results the search backend returns for one request.
pub const SEARCH_BACKEND_MAX_RESULTS: u32 = 10;

fn default_search_base_url() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_max_results() -> u32 {
    10
}

fn default_max_results_cap() -> u32 {
    SEARCH_BACKEND_MAX_RESULTS
}

impl SwitchyardConfig {
    /// Every configured secret value, for exact-match redaction.
    pub fn secret_values(&self) -> Vec<String> {
        [
            &self.openai.api_key,
            &self.anthropic.api_key,
            &self.gemini.api_key,
            &self.search.api_key,
        ]
        .into_iter()
        .flatten()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect()
    }

    /// A copy with every API key replaced by a marker, safe to print.
    pub fn redacted(&self) -> Self {
        let mask = |key: &Option<String>| key.as_ref().map(|_| "[REDACTED]".to_string());
        let mut copy = self.clone();
        copy.openai.api_key = mask(&self.openai.api_key);
        copy.anthropic.api_key = mask(&self.anthropic.api_key);
        copy.gemini.api_key = mask(&self.gemini.api_key);
        copy.search.api_key = mask(&self.search.api_key);
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_no_credentials() {
        let config = SwitchyardConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.routing.default_provider, Provider::OpenAi);
        assert!(config.openai.api_key.is_none());
        assert!(config.secret_values().is_empty());
        assert_eq!(config.chat.default_max_tokens, 1000);
        assert_eq!(config.search.max_results_cap, 10);
    }

    #[test]
    fn redacted_masks_only_present_keys() {
        let mut config = SwitchyardConfig::default();
        config.anthropic.api_key = Some("sk-ant-secret".into());
        let redacted = config.redacted();
        assert_eq!(redacted.anthropic.api_key.as_deref(), Some("[REDACTED]"));
        assert!(redacted.openai.api_key.is_none());
        assert_eq!(config.secret_values(), vec!["sk-ant-secret".to_string()]);
    }

    #[test]
    fn provider_alias_in_toml() {
        let config: SwitchyardConfig = toml::from_str(
            r#"
[routing]
default_provider = "tertiary"
"#,
        )
        .unwrap();
        assert_eq!(config.routing.default_provider, Provider::Gemini);
    }
}
