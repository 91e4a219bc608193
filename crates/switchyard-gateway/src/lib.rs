// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Switchyard.
//!
//! Exposes the dispatcher's chat, search, summarise and auto entry points,
//! the diagnostic classifier and health probes over axum.

pub mod handlers;
pub mod server;

pub use server::{build_router, cors_layer, start_server, GatewayState};
