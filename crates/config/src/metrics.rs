// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(
        "Invalid Prometheus prefix '{0}': must start with [a-zA-Z_:] and contain only [a-zA-Z0-9_:]"
    )]
    InvalidPrometheusPrefix(String),
}

/// Configuration for the Prometheus registry
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Prefix prepended to every exported metric name; empty means none
    ///
    /// Env: HELLO_METRICS_PREFIX
    /// Default: ""
    pub prefix: String,

    /// Export the process metrics bundle (CPU, memory, fds, start time)
    ///
    /// Env: HELLO_METRICS_DEFAULT
    /// Default: true
    pub collect_default: bool,
}

pub(crate) fn default_collect_default() -> bool {
    true
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            collect_default: default_collect_default(),
        }
    }
}

impl MetricsConfig {
    /// The prefix to hand to the registry, `None` when unset.
    pub fn prefix(&self) -> Option<&str> {
        if self.prefix.is_empty() {
            None
        } else {
            Some(&self.prefix)
        }
    }

    pub fn validate(&self) -> Result<(), MetricsError> {
        // Must match [a-zA-Z_:][a-zA-Z0-9_:]* or Prometheus rejects the series
        let mut chars = self.prefix.chars();
        let Some(first_char) = chars.next() else {
            return Ok(());
        };

        if !first_char.is_ascii_alphabetic() && first_char != '_' && first_char != ':' {
            return Err(MetricsError::InvalidPrometheusPrefix(self.prefix.clone()));
        }

        if chars.any(|ch| !ch.is_ascii_alphanumeric() && ch != '_' && ch != ':') {
            return Err(MetricsError::InvalidPrometheusPrefix(self.prefix.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_prefix(prefix: &str) -> MetricsConfig {
        MetricsConfig {
            prefix: prefix.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_metrics_config() {
        let config = MetricsConfig::default();
        assert!(config.prefix.is_empty());
        assert!(config.collect_default);
        assert_eq!(config.prefix(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefix_accessor() {
        assert_eq!(with_prefix("hello").prefix(), Some("hello"));
    }

    #[test]
    fn test_valid_prometheus_prefixes() {
        for prefix in ["my_app_metrics", "app:metrics", "_metrics", "Hello9"] {
            assert!(
                with_prefix(prefix).validate().is_ok(),
                "Prefix {} should be valid",
                prefix
            );
        }
    }

    #[test]
    fn test_invalid_prefix_starting_with_number() {
        assert!(with_prefix("123metrics").validate().is_err());
    }

    #[test]
    fn test_invalid_prefix_with_hyphen() {
        assert!(with_prefix("my-metrics").validate().is_err());
    }

    #[test]
    fn test_invalid_prefix_with_special_chars() {
        assert!(with_prefix("my.metrics").validate().is_err());
    }
}
