// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pool configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pool configuration, immutable after construction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Name identifying this pool (used in usage reports)
    pub name: String,
    /// Floor below which the pool never shrinks
    pub minimum: u32,
    /// Ceiling above which the pool never grows
    pub maximum: u32,
    /// How often the coordinator emits a usage report
    #[serde(with = "humantime_serde", default = "default_report_interval")]
    pub report_interval: Duration,
}

fn default_report_interval() -> Duration {
    Duration::from_secs(15)
}

impl PoolConfig {
    pub fn new(name: impl Into<String>, minimum: u32, maximum: u32) -> Self {
        Self {
            name: name.into(),
            minimum,
            maximum,
            report_interval: default_report_interval(),
        }
    }

    pub fn with_report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    /// Parse a configuration from a TOML fragment
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the size bounds are coherent
    ///
    /// Negative bounds are unrepresentable; the only invalid shape is an
    /// inverted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum > self.maximum {
            return Err(ConfigError::MinimumExceedsMaximum {
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
