// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all capability adapters implement.

use async_trait::async_trait;

use crate::error::SwitchyardError;
use crate::types::{AdapterType, HealthStatus};

/// Identity and health reporting shared by every capability adapter.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the kind of capability this adapter serves.
    fn adapter_type(&self) -> AdapterType;

    /// Reports whether the adapter can reach a real backend.
    ///
    /// Adapters without credentials report `Degraded`: they still answer,
    /// but with placeholder results.
    async fn health_check(&self) -> Result<HealthStatus, SwitchyardError>;
}
