// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for pool construction

use thiserror::Error;

/// Errors raised when a pool configuration is invalid
///
/// Configuration errors are fatal: they prevent pool creation and are never
/// produced by steady-state operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("minimum pool size ({minimum}) exceeds maximum ({maximum})")]
    MinimumExceedsMaximum { minimum: u32, maximum: u32 },
    #[error("failed to parse pool config: {0}")]
    Parse(#[from] toml::de::Error),
}
