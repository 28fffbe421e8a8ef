// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus configuration
//!
//! Only plain data lives here. Validation hooks and the time source are
//! code, so they are attached when the bus options are built.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Capacity given to each listener channel when none is configured
pub const DEFAULT_BUFFER_SIZE: usize = 3;

/// Largest capacity a listener channel can be created with
pub const MAX_BUFFER_SIZE: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Errors that can occur while loading bus configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// File-loadable bus settings
///
/// ```toml
/// buffer_size = 16
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusConfig {
    /// Per-listener channel capacity. Zero or negative means "use the default".
    pub buffer_size: i64,
}

impl BusConfig {
    pub fn with_buffer_size(buffer_size: i64) -> Self {
        Self { buffer_size }
    }

    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Channel capacity after applying the default and the upper bound
    pub fn resolved_buffer_size(&self) -> usize {
        resolve_buffer_size(self.buffer_size)
    }
}

/// Map a configured buffer size to a usable channel capacity
///
/// Non-positive values get the default; sizes above the channel limit are
/// clamped to it.
pub fn resolve_buffer_size(configured: i64) -> usize {
    match usize::try_from(configured) {
        Ok(size) if size > 0 => size.min(MAX_BUFFER_SIZE),
        _ => DEFAULT_BUFFER_SIZE,
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
