// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns chat, search and summarise calls into completion requests.

use std::fmt::Write as _;

use serde_json::Value;
use switchyard_core::traits::{ChatCall, SearchCall, SummariseCall};
use switchyard_core::types::{ChatMessage, Context, SummaryStyle};

use crate::backend::CompletionRequest;

/// Sampling settings for the narrative and refinement calls.
const TASK_TEMPERATURE: f32 = 0.3;
const TASK_MAX_TOKENS: u32 = 1000;

const SEARCH_SYSTEM: &str = "You are a research assistant. Answer the question using the \
    numbered search results provided. Cite the URLs you rely on and say so when the results \
    do not answer the question.";

const SUMMARISE_SYSTEM: &str = "You condense documents faithfully. Never add facts that are \
    not in the content.";

/// Context keys read by the task prompts.
pub const SEARCH_RESULTS_KEY: &str = "search_results";
pub const SUMMARY_LENGTH_KEY: &str = "summary_length";
pub const SUMMARY_STYLE_KEY: &str = "summary_style";
pub const LOCAL_SUMMARY_KEY: &str = "local_summary";

pub fn chat_request(call: &ChatCall) -> CompletionRequest {
    let system = call
        .context
        .as_ref()
        .filter(|ctx| !ctx.is_empty())
        .map(|ctx| format!("Additional context for this conversation:\n{}", render_context(ctx)));

    let mut messages = call.history.clone();
    messages.push(user(call.query.clone()));

    CompletionRequest {
        system,
        messages,
        temperature: call.temperature,
        max_tokens: call.max_tokens,
    }
}

pub fn search_request(call: &SearchCall) -> CompletionRequest {
    let results = call
        .context
        .as_ref()
        .and_then(|ctx| ctx.get(SEARCH_RESULTS_KEY))
        .and_then(Value::as_array);

    let mut prompt = format!("Question: {}\n\nSearch results:\n", call.query);
    match results {
        Some(results) if !results.is_empty() => {
            for (i, hit) in results.iter().enumerate() {
                let field = |name: &str| hit.get(name).and_then(Value::as_str).unwrap_or("");
                let _ = writeln!(
                    prompt,
                    "{}. {} ({})\n   {}",
                    i + 1,
                    field("title"),
                    field("url"),
                    field("snippet")
                );
            }
        }
        _ => prompt.push_str("No search results were available.\n"),
    }

    CompletionRequest {
        system: Some(SEARCH_SYSTEM.to_string()),
        messages: vec![user(prompt)],
        temperature: TASK_TEMPERATURE,
        max_tokens: TASK_MAX_TOKENS,
    }
}

pub fn summarise_request(call: &SummariseCall) -> CompletionRequest {
    let ctx = call.context.as_ref();
    let text = |key: &str| {
        ctx.and_then(|c| c.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let length = text(SUMMARY_LENGTH_KEY).unwrap_or_else(|| "medium".into());
    let style = text(SUMMARY_STYLE_KEY)
        .map(|s| SummaryStyle::parse_lenient(&s))
        .unwrap_or_default();
    let style_instruction = match style {
        SummaryStyle::Paragraph => "a single prose paragraph",
        SummaryStyle::BulletPoints => "bullet points, one per line, each starting with \"• \"",
        SummaryStyle::KeyPoints => "at most five key points, one per line, each starting with \"• \"",
    };

    let mut prompt = format!(
        "Summarise the content below as {style_instruction}. Target a {length} summary.\n"
    );
    if let Some(draft) = text(LOCAL_SUMMARY_KEY).filter(|d| !d.is_empty()) {
        let _ = write!(prompt, "\nAn extractive draft you may improve on:\n{draft}\n");
    }
    let _ = write!(prompt, "\nContent:\n{}", call.content);

    CompletionRequest {
        system: Some(SUMMARISE_SYSTEM.to_string()),
        messages: vec![user(prompt)],
        temperature: TASK_TEMPERATURE,
        max_tokens: TASK_MAX_TOKENS,
    }
}

fn user(content: String) -> ChatMessage {
    ChatMessage {
        role: "user".to_string(),
        content,
    }
}

fn render_context(ctx: &Context) -> String {
    serde_json::to_string_pretty(ctx).unwrap_or_default()
}
