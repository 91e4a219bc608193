// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request dispatch.
//!
//! The [`Dispatcher`] owns the provider registry, the search backend and the
//! local summariser, and turns each inbound request into exactly one
//! envelope. Provider and backend failures never escape as errors: they are
//! folded into a failure envelope carrying the intent's empty payload. The
//! only error returned to callers is a summarise-classified auto request with
//! nothing to summarise.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use switchyard_config::SwitchyardConfig;
use switchyard_core::traits::{ChatCall, SearchCall, SummariseCall, WebSearchQuery};
use switchyard_core::{
    AutoRequest, ChatEnvelope, ChatPayload, ChatRequest, ClassificationReport, Context, Envelope,
    Intent, Provider, RoutedEnvelope, SearchAdapter, SearchEnvelope, SearchPayload,
    SearchRequest, SearchType, SummariseEnvelope, SummarisePayload, SummariseRequest,
    SwitchyardError,
};
use switchyard_providers::prompt::{
    LOCAL_SUMMARY_KEY, SEARCH_RESULTS_KEY, SUMMARY_LENGTH_KEY, SUMMARY_STYLE_KEY,
};
use switchyard_providers::ProviderRegistry;
use switchyard_security::redact;
use switchyard_tools::LocalSummariser;
use tracing::{debug, info, warn};

use crate::classifier::IntentClassifier;

/// Message returned when an auto request routes to summarisation without content.
pub const MISSING_CONTENT: &str = "Content required for summarisation in context field";

/// Defaults applied when a request leaves a tunable unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchSettings {
    pub default_temperature: f32,
    pub default_max_tokens: u32,
    pub default_max_results: u32,
    /// Upper bound on results requested from the search backend.
    pub max_results_cap: u32,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::from_config(&SwitchyardConfig::default())
    }
}

impl DispatchSettings {
    pub fn from_config(config: &SwitchyardConfig) -> Self {
        Self {
            default_temperature: config.chat.default_temperature,
            default_max_tokens: config.chat.default_max_tokens,
            default_max_results: config.search.default_max_results,
            max_results_cap: config.search.max_results_cap,
        }
    }
}

/// Routes requests to language models and the search backend.
pub struct Dispatcher {
    classifier: IntentClassifier,
    providers: Arc<ProviderRegistry>,
    search: Arc<dyn SearchAdapter>,
    summariser: LocalSummariser,
    settings: DispatchSettings,
    secrets: Vec<String>,
}

impl Dispatcher {
    pub fn new(
        providers: Arc<ProviderRegistry>,
        search: Arc<dyn SearchAdapter>,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            providers,
            search,
            summariser: LocalSummariser::new(),
            settings,
            secrets: Vec::new(),
        }
    }

    /// Secret values scrubbed from failure messages before they reach a caller.
    pub fn with_secrets(mut self, secrets: Vec<String>) -> Self {
        self.secrets = secrets;
        self
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn search_backend(&self) -> &Arc<dyn SearchAdapter> {
        &self.search
    }

    pub fn settings(&self) -> DispatchSettings {
        self.settings
    }

    /// Diagnostic classification, no dispatch.
    pub fn classify(&self, query: &str) -> ClassificationReport {
        self.classifier.report(query)
    }

    /// Classifies the query (or detects embedded content) and serves it.
    pub async fn auto(&self, request: AutoRequest) -> Result<RoutedEnvelope, SwitchyardError> {
        let started = Instant::now();
        let intent = if request.embedded_content().is_some() {
            Intent::Summarise
        } else {
            self.classifier.classify(&request.query)
        };
        info!(%intent, "auto-routing query");

        match intent {
            Intent::Chat => {
                let chat = ChatRequest {
                    query: request.query,
                    provider: request.provider,
                    context: request.context,
                    ..ChatRequest::default()
                };
                Ok(RoutedEnvelope::Chat(self.run_chat(chat, started).await))
            }
            Intent::Search => {
                let search = SearchRequest {
                    query: request.query,
                    provider: request.provider,
                    context: request.context,
                    ..SearchRequest::default()
                };
                Ok(RoutedEnvelope::Search(self.run_search(search, started).await))
            }
            Intent::Summarise => {
                let content = request
                    .embedded_content()
                    .map(str::to_string)
                    .ok_or_else(|| SwitchyardError::InvalidRequest(MISSING_CONTENT.to_string()))?;
                let summarise = SummariseRequest {
                    query: request.query,
                    content,
                    provider: request.provider,
                    context: request.context,
                    ..SummariseRequest::default()
                };
                Ok(RoutedEnvelope::Summarise(
                    self.run_summarise(summarise, started).await,
                ))
            }
        }
    }

    pub async fn chat(&self, request: ChatRequest) -> ChatEnvelope {
        self.run_chat(request, Instant::now()).await
    }

    pub async fn search(&self, request: SearchRequest) -> SearchEnvelope {
        self.run_search(request, Instant::now()).await
    }

    pub async fn summarise(&self, request: SummariseRequest) -> SummariseEnvelope {
        self.run_summarise(request, Instant::now()).await
    }

    async fn run_chat(&self, request: ChatRequest, started: Instant) -> ChatEnvelope {
        let provider = self.providers.resolve(request.provider);
        match self.try_chat(request, provider).await {
            Ok(payload) => {
                info!(%provider, intent = "chat", elapsed_ms = elapsed_ms(started), "request served");
                Envelope::succeeded(provider, started.elapsed(), payload)
            }
            Err(e) => {
                let message = self.failure_message("Chat processing failed", &e);
                warn!(%provider, intent = "chat", error = %message, "request failed");
                Envelope::failed(provider, started.elapsed(), message, ChatPayload::default())
            }
        }
    }

    async fn try_chat(
        &self,
        request: ChatRequest,
        provider: Provider,
    ) -> Result<ChatPayload, SwitchyardError> {
        let adapter = self.providers.get(provider)?;
        let call = ChatCall {
            query: request.query,
            context: request.context,
            history: request.conversation_history.unwrap_or_default(),
            temperature: request
                .temperature
                .unwrap_or(self.settings.default_temperature),
            max_tokens: request
                .max_tokens
                .unwrap_or(self.settings.default_max_tokens),
        };
        let reply = adapter.chat(call).await?;
        Ok(ChatPayload {
            response: reply.text,
            conversation_id: None,
            usage_stats: reply.usage,
        })
    }

    async fn run_search(&self, request: SearchRequest, started: Instant) -> SearchEnvelope {
        let provider = self.providers.resolve(request.provider);
        let echoed = request.query.clone();
        match self.try_search(request, provider).await {
            Ok(payload) => {
                info!(
                    %provider,
                    intent = "search",
                    results = payload.total_results,
                    elapsed_ms = elapsed_ms(started),
                    "request served"
                );
                Envelope::succeeded(provider, started.elapsed(), payload)
            }
            Err(e) => {
                let message = self.failure_message("Search processing failed", &e);
                warn!(%provider, intent = "search", error = %message, "request failed");
                Envelope::failed(
                    provider,
                    started.elapsed(),
                    message,
                    SearchPayload::empty(echoed),
                )
            }
        }
    }

    async fn try_search(
        &self,
        request: SearchRequest,
        provider: Provider,
    ) -> Result<SearchPayload, SwitchyardError> {
        let max_results = request
            .max_results
            .unwrap_or(self.settings.default_max_results)
            .min(self.settings.max_results_cap);
        let search_type = if request.search_images {
            SearchType::Image
        } else {
            request.search_type
        };
        let query = WebSearchQuery {
            query: request.query.clone(),
            max_results,
            search_type,
            location: request.location,
        };
        let outcome = self.search.search_with_summary(&query).await?;
        debug!(results = outcome.results.len(), "search backend answered");

        let summary = if request.include_summary {
            let adapter = self.providers.get(provider)?;
            let mut context = request.context.unwrap_or_default();
            context.insert(
                SEARCH_RESULTS_KEY.to_string(),
                serde_json::to_value(&outcome.results)
                    .map_err(|e| SwitchyardError::Internal(e.to_string()))?,
            );
            let reply = adapter
                .search(SearchCall {
                    query: request.query.clone(),
                    context: Some(context),
                })
                .await?;
            if reply.text.trim().is_empty() {
                outcome.narrative
            } else {
                reply.text
            }
        } else {
            outcome.narrative
        };

        Ok(SearchPayload {
            total_results: outcome.results.len(),
            results: outcome.results,
            search_query: request.query,
            summary: Some(summary),
        })
    }

    async fn run_summarise(&self, request: SummariseRequest, started: Instant) -> SummariseEnvelope {
        let provider = self.providers.resolve(request.provider);
        let original_length = request.content.chars().count();
        match self.try_summarise(request, provider).await {
            Ok(payload) => {
                info!(
                    %provider,
                    intent = "summarise",
                    original_length = payload.original_length,
                    summary_length = payload.summary_length,
                    elapsed_ms = elapsed_ms(started),
                    "request served"
                );
                Envelope::succeeded(provider, started.elapsed(), payload)
            }
            Err(e) => {
                let message = self.failure_message("Summarisation failed", &e);
                warn!(%provider, intent = "summarise", error = %message, "request failed");
                Envelope::failed(
                    provider,
                    started.elapsed(),
                    message,
                    SummarisePayload::empty(original_length),
                )
            }
        }
    }

    async fn try_summarise(
        &self,
        request: SummariseRequest,
        provider: Provider,
    ) -> Result<SummarisePayload, SwitchyardError> {
        let local = self.summariser.summarise(
            &request.content,
            request.summary_length,
            request.summary_style,
        );

        let adapter = self.providers.get(provider)?;
        let mut context: Context = request.context.unwrap_or_default();
        context.insert(
            SUMMARY_LENGTH_KEY.to_string(),
            Value::String(request.summary_length.to_string()),
        );
        context.insert(
            SUMMARY_STYLE_KEY.to_string(),
            Value::String(request.summary_style.to_string()),
        );
        context.insert(
            LOCAL_SUMMARY_KEY.to_string(),
            Value::String(local.summary.clone()),
        );
        let reply = adapter
            .summarise(SummariseCall {
                content: request.content,
                context: Some(context),
            })
            .await?;

        let summary = if reply.text.trim().is_empty() {
            local.summary
        } else {
            reply.text
        };
        Ok(SummarisePayload {
            summary_length: summary.chars().count(),
            summary,
            original_length: local.original_length,
            compression_ratio: Some(local.compression_ratio),
            key_points: (!local.key_points.is_empty()).then_some(local.key_points),
        })
    }

    fn failure_message(&self, prefix: &str, error: &SwitchyardError) -> String {
        redact(&format!("{prefix}: {error}"), &self.secrets)
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchyard_core::{SummaryLength, SummaryStyle};
    use switchyard_test_utils::{MockModel, MockSearch, RecordedCall, MOCK_USAGE};

    struct Harness {
        dispatcher: Dispatcher,
        model: Arc<MockModel>,
        search: Arc<MockSearch>,
    }

    fn harness_with(model: MockModel, search: MockSearch) -> Harness {
        let model = Arc::new(model);
        let search = Arc::new(search);
        let mut registry = ProviderRegistry::new(Provider::OpenAi);
        registry.register(model.clone());
        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            search.clone(),
            DispatchSettings::default(),
        );
        Harness {
            dispatcher,
            model,
            search,
        }
    }

    fn harness() -> Harness {
        harness_with(MockModel::new(Provider::OpenAi), MockSearch::with_hits(8))
    }

    fn context(value: Value) -> Option<Context> {
        value.as_object().cloned()
    }

    #[tokio::test]
    async fn chat_uses_configured_defaults() {
        let h = harness();
        let env = h
            .dispatcher
            .chat(ChatRequest {
                query: "hello".into(),
                ..ChatRequest::default()
            })
            .await;

        assert!(env.success);
        assert!(env.message.is_none());
        assert_eq!(env.provider, "openai");
        assert_eq!(env.payload.response, "mock chat response");
        assert_eq!(env.payload.usage_stats, Some(MOCK_USAGE));
        assert!(env.payload.conversation_id.is_none());

        let calls = h.model.calls().await;
        let RecordedCall::Chat(call) = &calls[0] else {
            panic!("expected a chat call");
        };
        assert_eq!(call.temperature, 0.7);
        assert_eq!(call.max_tokens, 1000);
        assert!(call.history.is_empty());
    }

    #[tokio::test]
    async fn chat_request_overrides_defaults() {
        let h = harness();
        h.dispatcher
            .chat(ChatRequest {
                query: "hello".into(),
                temperature: Some(0.1),
                max_tokens: Some(42),
                ..ChatRequest::default()
            })
            .await;
        let calls = h.model.calls().await;
        let RecordedCall::Chat(call) = &calls[0] else {
            panic!("expected a chat call");
        };
        assert_eq!(call.temperature, 0.1);
        assert_eq!(call.max_tokens, 42);
    }

    #[tokio::test]
    async fn chat_failure_becomes_failure_envelope() {
        let h = harness_with(
            MockModel::failing(Provider::OpenAi, "upstream exploded"),
            MockSearch::with_hits(1),
        );
        let env = h
            .dispatcher
            .chat(ChatRequest {
                query: "hello".into(),
                ..ChatRequest::default()
            })
            .await;
        assert!(!env.success);
        assert_eq!(
            env.message.as_deref(),
            Some("Chat processing failed: provider error: upstream exploded")
        );
        assert_eq!(env.payload, ChatPayload::default());
        assert_eq!(env.provider, "openai");
    }

    #[tokio::test]
    async fn missing_adapter_is_reported_in_envelope() {
        let h = harness();
        let env = h
            .dispatcher
            .chat(ChatRequest {
                query: "hello".into(),
                provider: Some(Provider::Gemini),
                ..ChatRequest::default()
            })
            .await;
        assert!(!env.success);
        assert_eq!(env.provider, "gemini");
        assert!(env.message.unwrap().starts_with("Chat processing failed:"));
    }

    #[tokio::test]
    async fn failure_messages_are_redacted() {
        let h = harness_with(
            MockModel::failing(Provider::OpenAi, "bad key my-secret-value"),
            MockSearch::with_hits(1),
        );
        let dispatcher = h.dispatcher.with_secrets(vec!["my-secret-value".into()]);
        let env = dispatcher
            .chat(ChatRequest {
                query: "hello".into(),
                ..ChatRequest::default()
            })
            .await;
        let message = env.message.unwrap();
        assert!(!message.contains("my-secret-value"));
        assert!(message.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn search_prefers_model_narrative() {
        let h = harness_with(
            MockModel::with_replies(Provider::OpenAi, vec!["model narrative".into()]),
            MockSearch::with_hits(3),
        );
        let env = h
            .dispatcher
            .search(SearchRequest {
                query: "rust".into(),
                ..SearchRequest::default()
            })
            .await;
        assert!(env.success);
        assert_eq!(env.payload.total_results, 3);
        assert_eq!(env.payload.search_query, "rust");
        assert_eq!(env.payload.summary.as_deref(), Some("model narrative"));

        let calls = h.model.calls().await;
        let RecordedCall::Search(call) = &calls[0] else {
            panic!("expected a search call");
        };
        let hits = call.context.as_ref().unwrap()[SEARCH_RESULTS_KEY]
            .as_array()
            .unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0]["title"], "Hit 1");
    }

    #[tokio::test]
    async fn search_without_summary_uses_backend_narrative() {
        let h = harness();
        let env = h
            .dispatcher
            .search(SearchRequest {
                query: "rust".into(),
                include_summary: false,
                max_results: Some(2),
                ..SearchRequest::default()
            })
            .await;
        assert!(env.success);
        assert_eq!(env.payload.total_results, 2);
        assert_eq!(
            env.payload.summary.as_deref(),
            Some("Found 2 results for 'rust'. The top results discuss various aspects of the topic.")
        );
        assert!(h.model.calls().await.is_empty());
    }

    #[tokio::test]
    async fn search_clamps_result_count_and_passes_options() {
        let h = harness();
        h.dispatcher
            .search(SearchRequest {
                query: "cats".into(),
                max_results: Some(50),
                search_images: true,
                location: Some("uk".into()),
                include_summary: false,
                ..SearchRequest::default()
            })
            .await;
        let queries = h.search.queries().await;
        assert_eq!(queries[0].max_results, 10);
        assert_eq!(queries[0].search_type, SearchType::Image);
        assert_eq!(queries[0].location.as_deref(), Some("uk"));
    }

    #[tokio::test]
    async fn search_backend_failure_keeps_query_echo() {
        let h = harness_with(
            MockModel::new(Provider::OpenAi),
            MockSearch::failing("quota exceeded"),
        );
        let env = h
            .dispatcher
            .search(SearchRequest {
                query: "rust".into(),
                ..SearchRequest::default()
            })
            .await;
        assert!(!env.success);
        assert_eq!(env.payload, SearchPayload::empty("rust"));
        assert!(env
            .message
            .unwrap()
            .starts_with("Search processing failed: "));
    }

    #[tokio::test]
    async fn summarise_reports_local_ratio_and_key_points() {
        let h = harness_with(
            MockModel::with_replies(Provider::OpenAi, vec!["refined".into()]),
            MockSearch::with_hits(1),
        );
        let content = "First sentence. Second sentence. Third sentence.";
        let env = h
            .dispatcher
            .summarise(SummariseRequest {
                content: content.into(),
                summary_length: SummaryLength::Short,
                summary_style: SummaryStyle::Paragraph,
                ..SummariseRequest::default()
            })
            .await;

        assert!(env.success);
        assert_eq!(env.payload.summary, "refined");
        assert_eq!(env.payload.summary_length, 7);
        assert_eq!(env.payload.original_length, content.chars().count());
        let local = LocalSummariser::new().summarise(
            content,
            SummaryLength::Short,
            SummaryStyle::Paragraph,
        );
        assert_eq!(env.payload.compression_ratio, Some(local.compression_ratio));
        assert_eq!(env.payload.key_points.as_ref().map(Vec::len), Some(3));

        let calls = h.model.calls().await;
        let RecordedCall::Summarise(call) = &calls[0] else {
            panic!("expected a summarise call");
        };
        let ctx = call.context.as_ref().unwrap();
        assert_eq!(ctx[SUMMARY_LENGTH_KEY], "short");
        assert_eq!(ctx[SUMMARY_STYLE_KEY], "paragraph");
        assert_eq!(ctx[LOCAL_SUMMARY_KEY], Value::String(local.summary));
    }

    #[tokio::test]
    async fn medium_summary_of_long_content_reports_local_ratio() {
        let h = harness_with(
            MockModel::with_replies(Provider::OpenAi, vec!["refined".into()]),
            MockSearch::with_hits(1),
        );
        let content = format!("{}. {}", "a".repeat(49), "b".repeat(949));
        let env = h
            .dispatcher
            .summarise(SummariseRequest {
                content: content.clone(),
                summary_length: SummaryLength::Medium,
                summary_style: SummaryStyle::Paragraph,
                ..SummariseRequest::default()
            })
            .await;

        assert!(env.success);
        assert_eq!(env.payload.original_length, 1000);
        let local = LocalSummariser::new().summarise(
            &content,
            SummaryLength::Medium,
            SummaryStyle::Paragraph,
        );
        assert_eq!(local.summary_length, 400);
        assert_eq!(
            env.payload.compression_ratio,
            Some(local.summary_length as f64 / 1000.0)
        );
        assert_eq!(env.payload.compression_ratio, Some(0.4));
    }

    #[tokio::test]
    async fn summarise_failure_keeps_original_length() {
        let h = harness_with(
            MockModel::failing(Provider::OpenAi, "nope"),
            MockSearch::with_hits(1),
        );
        let env = h
            .dispatcher
            .summarise(SummariseRequest {
                content: "héllo".into(),
                ..SummariseRequest::default()
            })
            .await;
        assert!(!env.success);
        assert_eq!(env.payload, SummarisePayload::empty(5));
        assert_eq!(
            env.message.as_deref(),
            Some("Summarisation failed: provider error: nope")
        );
    }

    #[tokio::test]
    async fn auto_routes_embedded_content_to_summarise() {
        let h = harness();
        let routed = h
            .dispatcher
            .auto(AutoRequest {
                query: "search the latest news".into(),
                provider: None,
                context: context(serde_json::json!({"content": "Some text. More text."})),
            })
            .await
            .unwrap();
        assert_eq!(routed.intent(), Intent::Summarise);
        assert!(routed.success());
    }

    #[tokio::test]
    async fn auto_treats_whitespace_content_as_content() {
        let h = harness();
        let routed = h
            .dispatcher
            .auto(AutoRequest {
                query: "hello there".into(),
                provider: None,
                context: context(serde_json::json!({"content": "   \n"})),
            })
            .await
            .unwrap();
        assert_eq!(routed.intent(), Intent::Summarise);
        let calls = h.model.calls().await;
        assert!(matches!(calls[0], RecordedCall::Summarise(_)));
    }

    #[tokio::test]
    async fn auto_rejects_summarise_without_content() {
        let h = harness();
        let err = h
            .dispatcher
            .auto(AutoRequest {
                query: "tl;dr please".into(),
                ..AutoRequest::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SwitchyardError::InvalidRequest(ref m) if m == MISSING_CONTENT));
        assert!(h.model.calls().await.is_empty());
    }

    #[tokio::test]
    async fn auto_routes_by_classification() {
        let h = harness();
        let routed = h
            .dispatcher
            .auto(AutoRequest {
                query: "latest news on rust".into(),
                ..AutoRequest::default()
            })
            .await
            .unwrap();
        assert_eq!(routed.intent(), Intent::Search);
        assert_eq!(h.search.queries().await[0].max_results, 10);

        let routed = h
            .dispatcher
            .auto(AutoRequest {
                query: "banana".into(),
                provider: Some(Provider::OpenAi),
                context: None,
            })
            .await
            .unwrap();
        assert_eq!(routed.intent(), Intent::Chat);
        assert_eq!(routed.provider(), "openai");
    }

    #[test]
    fn classify_reports_without_dispatch() {
        let h = harness();
        let report = h.dispatcher.classify("summarize this");
        assert_eq!(report.classified_type, Intent::Summarise);
        assert_eq!(report.confidence_scores.summarise, 1.0);
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn served_requests_are_logged() {
        let h = harness();
        h.dispatcher
            .chat(ChatRequest {
                query: "hello".into(),
                ..ChatRequest::default()
            })
            .await;
        assert!(logs_contain("request served"));
    }
}
