use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind host address or hostname: {0}")]
    InvalidHost(String),

    #[error("Port must be between 1 and 65535, got {0}")]
    InvalidPort(u16),
}

/// Validates that a string is a valid host (IP address or hostname)
fn is_valid_host(host: &str) -> bool {
    if IpAddr::from_str(host).is_ok() {
        return true;
    }

    // RFC 1123 hostname
    if host.is_empty() || host.len() > 253 {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    ///
    /// Env: HELLO_BIND_HOST
    /// Default: 0.0.0.0
    pub bind_host: String,

    /// Port to bind the HTTP server to
    ///
    /// Env: HELLO_PORT
    /// Default: 3000
    pub port: u16,
}

pub(crate) fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    3000
}

impl ServerConfig {
    pub(crate) fn validate(&self) -> Result<(), ServerError> {
        if !is_valid_host(&self.bind_host) {
            return Err(ServerError::InvalidHost(self.bind_host.clone()));
        }

        if self.port == 0 {
            return Err(ServerError::InvalidPort(self.port));
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
        }
    }
}
