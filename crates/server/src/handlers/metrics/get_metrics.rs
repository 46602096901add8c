use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{metrics::MetricsError, state::AppState};

/// Handler for Prometheus metrics endpoint (text format)
///
/// Encoding runs on the blocking pool so a large exposition never holds up
/// other requests on the async workers.
pub async fn get_metrics(State(state): State<AppState>) -> Result<Response, MetricsError> {
    let registry = state.metrics.clone();
    let exposition = tokio::task::spawn_blocking(move || registry.serialize()).await??;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, exposition.content_type)],
        exposition.body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsRegistry;
    use hello_pipeline_config::AppConfig;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_get_metrics_renders_registry() {
        let metrics = MetricsRegistry::new(None).unwrap();
        metrics.http_requests().increment("GET", "/", 200);
        let state = AppState::with_metrics(AppConfig::default(), metrics);

        let response = get_metrics(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains(r#"http_requests_total{method="GET",route="/",status="200"} 1"#));
    }

    #[tokio::test]
    async fn test_metrics_error_is_server_error() {
        let response = MetricsError::AlreadyRegistered("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).starts_with("Failed to gather metrics:"));
    }
}
