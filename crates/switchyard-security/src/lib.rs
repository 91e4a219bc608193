// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret handling for Switchyard.
//!
//! Credentials must never reach logs or response envelopes. This crate
//! provides the redaction used by both paths.

pub mod redact;

pub use redact::{redact, RedactingWriter, SecretValues, REDACTED};
