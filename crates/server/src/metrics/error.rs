use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Metric '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("Exposition is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Metrics task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Failed to gather metrics");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to gather metrics: {}", self),
        )
            .into_response()
    }
}
