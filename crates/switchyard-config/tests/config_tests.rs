// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Switchyard configuration system.

use figment::Jail;
use switchyard_config::diagnostic::ConfigError;
use switchyard_config::{load_and_validate_str, load_config, load_config_from_str};
use switchyard_core::Provider;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[server]
host = "127.0.0.1"
port = 9090
allowed_origins = ["https://app.example.com"]
log_level = "debug"
environment = "staging"

[routing]
default_provider = "anthropic"
request_timeout_secs = 15

[chat]
default_temperature = 0.2
default_max_tokens = 256

[openai]
api_key = "sk-test-123"
model = "gpt-4o-mini"

[gemini]
model = "gemini-1.5-flash"

[search]
api_key = "search-key"
engine_id = "cx-1"
default_max_results = 5
max_results_cap = 8
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.allowed_origins, vec!["https://app.example.com"]);
    assert_eq!(config.server.environment, "staging");
    assert_eq!(config.routing.default_provider, Provider::Anthropic);
    assert_eq!(config.routing.request_timeout_secs, 15);
    assert_eq!(config.chat.default_max_tokens, 256);
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
    assert_eq!(config.openai.model, "gpt-4o-mini");
    assert_eq!(config.anthropic.model, "claude-3-sonnet-20240229");
    assert_eq!(config.gemini.model, "gemini-1.5-flash");
    assert_eq!(config.search.engine_id.as_deref(), Some("cx-1"));
    assert_eq!(config.search.default_max_results, 5);
}

#[test]
fn empty_toml_yields_defaults() {
    let config = load_config_from_str("").expect("empty config is valid");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.allowed_origins, vec!["*"]);
    assert_eq!(config.routing.default_provider, Provider::OpenAi);
    assert!(config.anthropic.api_key.is_none());
}

#[test]
fn unknown_key_produces_suggestion() {
    let toml = r#"
[server]
prot = 9000
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(key, "prot");
            assert_eq!(suggestion.as_deref(), Some("port"));
            assert!(span.is_some(), "inline source should resolve a span");
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[ollama]\nmodel = \"x\"\n").expect_err("unknown section");
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

#[test]
fn unknown_provider_name_is_rejected() {
    let toml = r#"
[routing]
default_provider = "mistral"
"#;
    let errors = load_and_validate_str(toml).expect_err("unknown provider");
    let rendered = errors[0].to_string();
    assert!(rendered.contains("mistral"), "got: {rendered}");
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").expect_err("bad type");
    assert!(matches!(errors[0], ConfigError::InvalidType { .. }));
}

#[test]
fn semantic_errors_are_collected() {
    let toml = r#"
[server]
port = 0

[chat]
default_temperature = 5.0
"#;
    let errors = load_and_validate_str(toml).expect_err("two semantic errors");
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// Drops the inherited environment and points the XDG config lookup inside
/// the jail, so only what a test sets is visible to the loader.
fn isolate(jail: &mut Jail) {
    jail.clear_env();
    let home = jail.directory().to_string_lossy().into_owned();
    jail.set_env("XDG_CONFIG_HOME", &home);
    jail.set_env("HOME", &home);
}

#[test]
fn conventional_env_vars_fill_keys_and_port() {
    Jail::expect_with(|jail| {
        isolate(jail);
        jail.set_env("OPENAI_API_KEY", "sk-from-env");
        jail.set_env("SEARCH_ENGINE_ID", "cx-env");
        jail.set_env("PORT", "7000");
        let config = load_config()?;
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(config.search.engine_id.as_deref(), Some("cx-env"));
        assert_eq!(config.server.port, 7000);
        Ok(())
    });
}

#[test]
fn prefixed_env_overrides_file_and_conventional_vars() {
    Jail::expect_with(|jail| {
        isolate(jail);
        jail.create_file(
            "switchyard.toml",
            r#"
[server]
port = 9100

[search]
max_results_cap = 6
"#,
        )?;
        jail.set_env("PORT", "7000");
        jail.set_env("SWITCHYARD_SERVER_PORT", "7500");
        jail.set_env("SWITCHYARD_SEARCH_MAX_RESULTS_CAP", "4");
        jail.set_env("SWITCHYARD_ROUTING_DEFAULT_PROVIDER", "gemini");
        let config = load_config()?;
        assert_eq!(config.server.port, 7500);
        assert_eq!(config.search.max_results_cap, 4);
        assert_eq!(config.routing.default_provider, Provider::Gemini);
        Ok(())
    });
}

#[test]
fn local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        isolate(jail);
        jail.create_file("switchyard.toml", "[anthropic]\napi_key = \"sk-ant-file\"\n")?;
        let config = load_config()?;
        assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-file"));
        let printed = serde_json::to_string(&config.redacted()).expect("serializable");
        assert!(!printed.contains("sk-ant-file"));
        Ok(())
    });
}
