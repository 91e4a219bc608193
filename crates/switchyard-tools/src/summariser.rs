// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local, deterministic content condensation.
//!
//! Runs before any model refinement and never touches the network. Its
//! compression ratio is the one reported to callers, whatever the model
//! later returns.

use switchyard_core::{SummaryLength, SummaryStyle};

/// Maximum number of key points extracted from a document.
pub const MAX_KEY_POINTS: usize = 5;

const BULLET: &str = "• ";
const ELLIPSIS: &str = "...";

/// Result of a local condensation.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSummary {
    pub summary: String,
    /// Characters in the submitted content.
    pub original_length: usize,
    /// Characters in `summary`.
    pub summary_length: usize,
    pub compression_ratio: f64,
    /// Leading sentences as bullets, independent of `style`.
    pub key_points: Vec<String>,
    pub length: SummaryLength,
    pub style: SummaryStyle,
}

/// Extractive summariser sized by [`SummaryLength::multiplier`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSummariser;

impl LocalSummariser {
    pub fn new() -> Self {
        Self
    }

    /// Condense `content` to roughly `multiplier × chars` in the requested style.
    pub fn summarise(
        &self,
        content: &str,
        length: SummaryLength,
        style: SummaryStyle,
    ) -> LocalSummary {
        let original_length = char_len(content);
        let target = (original_length as f64 * length.multiplier()) as usize;
        let key_points = extract_key_points(content, MAX_KEY_POINTS);

        let summary = if content.trim().is_empty() {
            String::new()
        } else {
            match style {
                SummaryStyle::Paragraph => paragraph(content, target),
                SummaryStyle::BulletPoints => bullets(content, target),
                SummaryStyle::KeyPoints => key_points.join("\n"),
            }
        };

        let summary_length = char_len(&summary);
        LocalSummary {
            compression_ratio: compression_ratio(original_length, summary_length),
            summary,
            original_length,
            summary_length,
            key_points,
            length,
            style,
        }
    }
}

/// The first `max_points` sentences (split on `". "`) as bullets.
pub fn extract_key_points(content: &str, max_points: usize) -> Vec<String> {
    content
        .split(". ")
        .take(max_points)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("{BULLET}{s}"))
        .collect()
}

/// `summary / original`, or 0 for empty input.
pub fn compression_ratio(original_length: usize, summary_length: usize) -> f64 {
    if original_length == 0 {
        0.0
    } else {
        summary_length as f64 / original_length as f64
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Sentences with their terminating period restored.
fn sentences(content: &str) -> Vec<String> {
    let pieces: Vec<&str> = content.split(". ").collect();
    let last = pieces.len().saturating_sub(1);
    pieces
        .iter()
        .enumerate()
        .filter_map(|(i, piece)| {
            let piece = piece.trim();
            if piece.is_empty() {
                None
            } else if i < last {
                Some(format!("{piece}."))
            } else {
                Some(piece.to_string())
            }
        })
        .collect()
}

/// Leading characters of `s` followed by an ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    let kept: String = s.chars().take(max_chars.max(1)).collect();
    format!("{}{ELLIPSIS}", kept.trim_end())
}

/// Whole leading sentences that fit in `target` characters. When they fill
/// less than half the target, the next sentence is truncated into the rest.
fn paragraph(content: &str, target: usize) -> String {
    let all = sentences(content);
    let mut out = String::new();
    let mut packed = 0;
    for sentence in &all {
        let extra = if out.is_empty() {
            char_len(sentence)
        } else {
            char_len(sentence) + 1
        };
        if char_len(&out) + extra > target {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(sentence);
        packed += 1;
    }
    if out.is_empty() {
        if let Some(first) = all.first() {
            return truncate(first, target);
        }
        return out;
    }

    let used = char_len(&out);
    if used < target / 2 {
        if let Some(next) = all.get(packed) {
            let room = target.saturating_sub(used + 1);
            if room > ELLIPSIS.len() {
                out.push(' ');
                out.push_str(&truncate(next, room - ELLIPSIS.len()));
            }
        }
    }
    out
}

/// One bullet line per leading sentence, within `target` characters.
fn bullets(content: &str, target: usize) -> String {
    let all = sentences(content);
    let mut lines: Vec<String> = Vec::new();
    let mut used = 0;
    for sentence in &all {
        let line = format!("{BULLET}{sentence}");
        let extra = char_len(&line) + usize::from(!lines.is_empty());
        if used + extra > target {
            break;
        }
        used += extra;
        lines.push(line);
    }
    if lines.is_empty() {
        if let Some(first) = all.first() {
            let budget = target.saturating_sub(char_len(BULLET));
            lines.push(format!("{BULLET}{}", truncate(first, budget)));
        }
    }
    lines.join("\n")
}
