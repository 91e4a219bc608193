// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification and dispatch for Switchyard.
//!
//! [`IntentClassifier`] decides which intent a free-form query belongs to;
//! [`Dispatcher`] serves chat, search and summarise requests (directly or
//! auto-routed) and always answers with a uniform envelope.

pub mod classifier;
pub mod dispatcher;

pub use classifier::{IntentClassifier, IntentScores, NO_SIGNAL_CONFIDENCE};
pub use dispatcher::{DispatchSettings, Dispatcher, MISSING_CONTENT};
