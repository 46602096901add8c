use axum::{Router, http::StatusCode, middleware};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{logging, metrics, routes, state::AppState};

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Build the service router.
///
/// Layers, innermost first: panic recovery, request metrics, access log. The
/// metrics layer therefore sees every response, 404s and recovered panics included.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::root::routes())
        .merge(routes::health::routes())
        .merge(routes::metrics::routes())
        .fallback(not_found)
        .layer(CatchPanicLayer::new())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            metrics::metrics_middleware,
        ))
        .layer(middleware::from_fn(logging::http_logger_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsRegistry;
    use axum::{body::Body, http::Request};
    use hello_pipeline_config::AppConfig;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::with_metrics(AppConfig::default(), MetricsRegistry::new(None).unwrap())
    }

    async fn boom() -> &'static str {
        panic!("handler failure")
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    #[tokio::test]
    async fn test_root() {
        let (status, body) = send(create_app(test_state()), "GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            r#"{"message":"Hello from CI/CD Pipeline!","version":"1.0"}"#
        );
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(create_app(test_state()), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"healthy"}"#);
    }

    #[tokio::test]
    async fn test_unknown_route_is_counted() {
        let state = test_state();
        let (status, _) = send(create_app(state.clone()), "GET", "/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(state.metrics.http_requests().get("GET", "/nope", 404), 1);
    }

    #[tokio::test]
    async fn test_wrong_method_is_counted() {
        let state = test_state();
        let (status, _) = send(create_app(state.clone()), "POST", "/health").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(state.metrics.http_requests().get("POST", "/health", 405), 1);
    }

    #[tokio::test]
    async fn test_metrics_request_is_counted_after_it_completes() {
        let state = test_state();

        let (_, first) = send(create_app(state.clone()), "GET", "/metrics").await;
        assert!(!first.contains(r#"route="/metrics""#));

        let (status, second) = send(create_app(state.clone()), "GET", "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(second.contains(r#"http_requests_total{method="GET",route="/metrics",status="200"} 1"#));
    }

    #[tokio::test]
    async fn test_panicking_handler_is_counted_as_server_error() {
        let state = test_state();
        let app = Router::new()
            .route("/boom", axum::routing::get(boom))
            .layer(CatchPanicLayer::new())
            .layer(middleware::from_fn_with_state(
                state.clone(),
                metrics::metrics_middleware,
            ))
            .with_state(state.clone());

        let (status, _) = send(app, "GET", "/boom").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.metrics.http_requests().get("GET", "/boom", 500), 1);
    }
}
