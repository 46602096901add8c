use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

use super::observer::{Completion, ObservedBody, body_is_discarded};

/// Metrics middleware counting every request by method, raw path and status.
///
/// Labels are captured before the request is handed on. The increment happens
/// when the response body finishes (or, for HEAD and bodyless statuses, when
/// the server releases it), so requests abandoned mid-flight are not counted. The response itself passes through untouched and unbuffered.
pub async fn metrics_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let counter = state.metrics.http_requests().clone();
    let request_method = req.method().clone();
    let method = request_method.as_str().to_string();
    let route = req.uri().path().to_string();

    let response = next.run(req).await;

    let (parts, body) = response.into_parts();
    let discarded = body_is_discarded(&request_method, parts.status);
    let completion = Completion::new(counter, method, route, parts.status.as_u16());
    Response::from_parts(
        parts,
        Body::new(ObservedBody::new(body, completion, discarded)),
    )
}
