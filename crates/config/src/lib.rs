// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process configuration for the hello-pipeline service.
//!
//! Every setting comes from an environment variable prefixed with `HELLO_`.
//! Values are first read into a flat [`EnvConfig`] and then split into the
//! validated sections the server consumes.

mod args;
mod error;
mod log;
mod metrics;
mod server;

pub use args::{Args, load_env_file};
pub use error::ConfigError;
pub use log::{LogConfig, LogError};
pub use metrics::{MetricsConfig, MetricsError};
pub use server::{ServerConfig, ServerError};

use serde::Deserialize;

/// Prefix shared by every environment variable the service reads.
pub const ENV_PREFIX: &str = "HELLO_";

/// Flat view of the environment, one field per `HELLO_*` variable.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "server::default_bind_host")]
    bind_host: String,
    #[serde(default = "server::default_port")]
    port: u16,

    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,

    #[serde(default)]
    metrics_prefix: String,
    #[serde(default = "metrics::default_collect_default")]
    metrics_default: bool,
}

impl From<EnvConfig> for AppConfig {
    fn from(env: EnvConfig) -> Self {
        Self {
            server: ServerConfig {
                bind_host: env.bind_host,
                port: env.port,
            },
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            metrics: MetricsConfig {
                prefix: env.metrics_prefix,
                collect_default: env.metrics_default,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Build the configuration from explicit `(key, value)` pairs.
    ///
    /// Keys that do not carry [`ENV_PREFIX`] are ignored.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvConfig>(vars)?;
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.log.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.log.level, "info");
        assert!(config.metrics.collect_default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_env_matches_defaults() {
        let config = AppConfig::from_vars(Vec::new()).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.server.bind_host, defaults.server.bind_host);
        assert_eq!(config.log.level, defaults.log.level);
        assert_eq!(config.log.write_max_files, defaults.log.write_max_files);
        assert_eq!(config.metrics.prefix, defaults.metrics.prefix);
    }

    #[test]
    fn test_overrides_from_vars() {
        let config = AppConfig::from_vars(vars(&[
            ("HELLO_PORT", "8081"),
            ("HELLO_BIND_HOST", "127.0.0.1"),
            ("HELLO_LOG_LEVEL", "debug"),
            ("HELLO_LOG_JSON", "true"),
            ("HELLO_METRICS_PREFIX", "hello"),
            ("HELLO_METRICS_DEFAULT", "false"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.bind_host, "127.0.0.1");
        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);
        assert_eq!(config.metrics.prefix, "hello");
        assert!(!config.metrics.collect_default);
    }

    #[test]
    fn test_unprefixed_vars_are_ignored() {
        let config = AppConfig::from_vars(vars(&[("PORT", "9999")])).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_unparsable_port_is_env_error() {
        let err = AppConfig::from_vars(vars(&[("HELLO_PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    }

    #[test]
    fn test_validation_errors_are_sectioned() {
        let err = AppConfig::from_vars(vars(&[("HELLO_PORT", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::ServerError(_)));

        let err = AppConfig::from_vars(vars(&[("HELLO_LOG_LEVEL", "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::LogError(_)));

        let err = AppConfig::from_vars(vars(&[("HELLO_METRICS_PREFIX", "9lives")])).unwrap_err();
        assert!(matches!(err, ConfigError::MetricsError(_)));
    }
}
