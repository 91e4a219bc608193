// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexical intent classification.
//!
//! Scores each intent by how many of its phrase patterns occur in the query.
//! No model call, no network, no failure mode: every query maps to exactly
//! one intent.

use std::sync::LazyLock;

use regex::Regex;
use switchyard_core::{ClassificationReport, ConfidenceDistribution, Intent};

/// Lookup verbs, recency words and comparisons.
static SEARCH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(search|find|look|lookup|what is|who is|where is|when is|how to)\b").unwrap(),
        Regex::new(r"\b(latest|news|current|recent|today)\b").unwrap(),
        Regex::new(r"\b(compare|vs|versus|difference)\b").unwrap(),
    ]
});

/// Explanatory, opinion and conversational verbs.
static CHAT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(help|explain|tell me|discuss|talk about)\b").unwrap(),
        Regex::new(r"\b(opinion|think|feel|believe)\b").unwrap(),
        Regex::new(r"\b(conversation|chat|ask)\b").unwrap(),
    ]
});

/// Condensation nouns and abbreviations.
static SUMMARISE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b(summarize|summarise|summary|brief|overview)\b").unwrap(),
        Regex::new(r"\b(key points|main points|highlights)\b").unwrap(),
        Regex::new(r"\b(tldr|tl;dr|in short|briefly)\b").unwrap(),
    ]
});

/// Returned by [`IntentClassifier::confidence`] when nothing matches.
/// Chat carries the extra hundredth; the values are kept for compatibility.
pub const NO_SIGNAL_CONFIDENCE: ConfidenceDistribution = ConfidenceDistribution {
    search: 0.33,
    chat: 0.34,
    summarise: 0.33,
};

/// Raw per-intent match counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntentScores {
    pub search: u32,
    pub chat: u32,
    pub summarise: u32,
}

impl IntentScores {
    pub fn get(&self, intent: Intent) -> u32 {
        match intent {
            Intent::Search => self.search,
            Intent::Chat => self.chat,
            Intent::Summarise => self.summarise,
        }
    }

    pub fn total(&self) -> u32 {
        self.search + self.chat + self.summarise
    }
}

/// Stateless heuristic classifier, safe to share across requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Count, per intent, the patterns matching the lowercased query.
    /// A pattern contributes at most 1 however often it matches.
    pub fn scores(&self, query: &str) -> IntentScores {
        let lower = query.to_lowercase();
        let count = |patterns: &[Regex]| patterns.iter().filter(|p| p.is_match(&lower)).count() as u32;
        IntentScores {
            search: count(&SEARCH_PATTERNS),
            chat: count(&CHAT_PATTERNS),
            summarise: count(&SUMMARISE_PATTERNS),
        }
    }

    /// Highest-scoring intent. Ties go to the earliest of Search, Chat,
    /// Summarise; a query with no signal at all is Chat.
    pub fn classify(&self, query: &str) -> Intent {
        let scores = self.scores(query);
        if scores.total() == 0 {
            return Intent::Chat;
        }
        let mut best = Intent::ALL[0];
        for intent in Intent::ALL {
            if scores.get(intent) > scores.get(best) {
                best = intent;
            }
        }
        best
    }

    /// Scores normalised by their sum, or [`NO_SIGNAL_CONFIDENCE`].
    pub fn confidence(&self, query: &str) -> ConfidenceDistribution {
        let scores = self.scores(query);
        let total = scores.total();
        if total == 0 {
            return NO_SIGNAL_CONFIDENCE;
        }
        let share = |n: u32| f64::from(n) / f64::from(total);
        ConfidenceDistribution {
            search: share(scores.search),
            chat: share(scores.chat),
            summarise: share(scores.summarise),
        }
    }

    /// Diagnostic view: intent plus distribution.
    pub fn report(&self, query: &str) -> ClassificationReport {
        ClassificationReport {
            query: query.to_string(),
            classified_type: self.classify(query),
            confidence_scores: self.confidence(query),
        }
    }
}
