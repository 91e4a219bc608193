// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Two complementary mechanisms:
//! 1. **Regex-based**: known credential formats (provider API keys, Bearer
//!    tokens, `key=` query parameters).
//! 2. **Exact-match**: the configured secret values loaded at startup.

use std::io::Write;
use std::sync::{Arc, LazyLock, RwLock};

use regex::Regex;

/// The redaction placeholder.
pub const REDACTED: &str = "[REDACTED]";

/// Known secret patterns, each with its replacement template.
static REDACTION_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // Anthropic API keys: sk-ant-api03-...
        (Regex::new(r"sk-ant-[a-zA-Z0-9_\-]{20,}").unwrap(), REDACTED),
        // OpenAI style keys, including project keys: sk-proj-...
        (Regex::new(r"sk-(?:proj-)?[a-zA-Z0-9_\-]{20,}").unwrap(), REDACTED),
        // Google API keys (Gemini, Custom Search)
        (Regex::new(r"AIza[0-9A-Za-z_\-]{35}").unwrap(), REDACTED),
        // Bearer tokens in headers
        (Regex::new(r"Bearer\s+[a-zA-Z0-9._\-]{10,}").unwrap(), REDACTED),
        // Credentials carried as a URL query parameter
        (Regex::new(r"([?&]key=)[^&\s]+").unwrap(), "${1}[REDACTED]"),
    ]
});

/// Redact secrets from a string using regex patterns and exact-match values.
///
/// Used for failure messages placed in response envelopes as well as by
/// [`RedactingWriter`] for log output.
pub fn redact(input: &str, secret_values: &[String]) -> String {
    let mut result = input.to_string();

    for (pattern, replacement) in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, *replacement).into_owned();
    }

    // Longest first so a value containing another is replaced whole.
    let mut sorted_values: Vec<&String> = secret_values.iter().collect();
    sorted_values.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted_values {
        if !value.is_empty() {
            result = result.replace(value.as_str(), REDACTED);
        }
    }

    result
}

/// Shared list of exact secret values.
pub type SecretValues = Arc<RwLock<Vec<String>>>;

/// A writer wrapper that redacts secrets from output.
///
/// Wraps any `Write` implementor and replaces known secret patterns and
/// exact configured values with `[REDACTED]`.
pub struct RedactingWriter<W> {
    inner: W,
    secret_values: SecretValues,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, secret_values: SecretValues) -> Self {
        Self {
            inner,
            secret_values,
        }
    }

    /// Add a value to the redaction list, ignoring empties and duplicates.
    pub fn add_secret(secret_values: &SecretValues, value: String) {
        if value.is_empty() {
            return;
        }
        if let Ok(mut values) = secret_values.write() {
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        let values = self
            .secret_values
            .read()
            .map(|v| v.clone())
            .unwrap_or_default();
        let redacted = redact(&input, &values);
        self.inner.write_all(redacted.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
