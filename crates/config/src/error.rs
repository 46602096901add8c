use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Failed to load env file '{path}': {source}")]
    EnvFileError {
        path: String,
        #[source]
        source: dotenv::Error,
    },

    #[error("Server configuration error: {0}")]
    ServerError(#[from] crate::server::ServerError),

    #[error("Log configuration error: {0}")]
    LogError(#[from] crate::log::LogError),

    #[error("Metrics configuration error: {0}")]
    MetricsError(#[from] crate::metrics::MetricsError),
}
