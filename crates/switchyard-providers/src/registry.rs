// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry, built once at startup and read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use switchyard_config::SwitchyardConfig;
use switchyard_core::{
    HealthStatus, LanguageModelAdapter, PluginAdapter, Provider, SwitchyardError,
};
use tracing::{info, warn};

use crate::adapter::ModelAdapter;
use crate::anthropic::AnthropicBackend;
use crate::gemini::GeminiBackend;
use crate::openai::OpenAiBackend;

/// Language-model adapters indexed by provider.
pub struct ProviderRegistry {
    adapters: HashMap<Provider, Arc<dyn LanguageModelAdapter>>,
    default_provider: Provider,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new(default_provider: Provider) -> Self {
        Self {
            adapters: HashMap::new(),
            default_provider,
        }
    }

    /// Builds one adapter per provider. Providers without an API key get a
    /// placeholder adapter.
    pub fn from_config(config: &SwitchyardConfig) -> Result<Self, SwitchyardError> {
        let timeout = Duration::from_secs(config.routing.request_timeout_secs);
        let mut registry = Self::new(config.routing.default_provider);

        let openai = match configured_key(&config.openai.api_key) {
            Some(key) => ModelAdapter::with_backend(
                Provider::OpenAi,
                config.openai.model.clone(),
                Arc::new(OpenAiBackend::new(key, &config.openai, timeout)?),
            ),
            None => ModelAdapter::placeholder(Provider::OpenAi, config.openai.model.clone()),
        };
        let anthropic = match configured_key(&config.anthropic.api_key) {
            Some(key) => ModelAdapter::with_backend(
                Provider::Anthropic,
                config.anthropic.model.clone(),
                Arc::new(AnthropicBackend::new(key, &config.anthropic, timeout)?),
            ),
            None => ModelAdapter::placeholder(Provider::Anthropic, config.anthropic.model.clone()),
        };
        let gemini = match configured_key(&config.gemini.api_key) {
            Some(key) => ModelAdapter::with_backend(
                Provider::Gemini,
                config.gemini.model.clone(),
                Arc::new(GeminiBackend::new(key, &config.gemini, timeout)?),
            ),
            None => ModelAdapter::placeholder(Provider::Gemini, config.gemini.model.clone()),
        };

        for adapter in [openai, anthropic, gemini] {
            if adapter.is_configured() {
                info!(provider = %adapter.provider(), "provider configured");
            } else {
                warn!(
                    provider = %adapter.provider(),
                    "no API key configured, serving placeholder replies"
                );
            }
            registry.register(Arc::new(adapter));
        }

        Ok(registry)
    }

    /// Registers an adapter under its own provider, replacing any previous one.
    pub fn register(&mut self, adapter: Arc<dyn LanguageModelAdapter>) {
        self.adapters.insert(adapter.provider(), adapter);
    }

    pub fn default_provider(&self) -> Provider {
        self.default_provider
    }

    /// The requested provider, or the configured default.
    pub fn resolve(&self, requested: Option<Provider>) -> Provider {
        requested.unwrap_or(self.default_provider)
    }

    pub fn get(&self, provider: Provider) -> Result<Arc<dyn LanguageModelAdapter>, SwitchyardError> {
        self.adapters
            .get(&provider)
            .cloned()
            .ok_or_else(|| SwitchyardError::AdapterNotFound {
                adapter_type: "LanguageModel".into(),
                name: provider.to_string(),
            })
    }

    /// Health of every registered provider, in registry order.
    pub async fn health(&self) -> Vec<(Provider, HealthStatus)> {
        let mut statuses = Vec::with_capacity(self.adapters.len());
        for provider in Provider::ALL {
            if let Some(adapter) = self.adapters.get(&provider) {
                let status = adapter
                    .health_check()
                    .await
                    .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));
                statuses.push((provider, status));
            }
        }
        statuses
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

fn configured_key(key: &Option<String>) -> Option<&str> {
    key.as_deref().map(str::trim).filter(|k| !k.is_empty())
}
