// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Level;

/// Level an access-log line is emitted at for a given status code.
fn level_for_status(status: u16) -> Level {
    match status {
        100..=399 => Level::DEBUG,
        400..=499 => Level::WARN,
        _ => Level::ERROR,
    }
}

/// HTTP logger middleware that logs request method, path, status code, and duration.
///
/// - DEBUG (target: http) for 1xx-3xx responses
/// - WARN for 4xx responses
/// - ERROR for 5xx responses
///
/// Log format: "METHOD /path STATUS DURATIONms"
/// Example: "GET /health 200 1ms"
pub async fn http_logger_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let full_path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis();
    let status_code = response.status().as_u16();

    // tracing needs a constant level per callsite, so the fields live here once
    // and each level gets its own expansion.
    macro_rules! access_log {
        ($event:ident) => {
            tracing::$event!(
                target: "http",
                method = %method,
                path = %full_path,
                status = status_code,
                duration_ms = duration_ms,
                "{} {} {} {}ms",
                method,
                full_path,
                status_code,
                duration_ms
            )
        };
    }

    let level = level_for_status(status_code);
    if level == Level::DEBUG {
        access_log!(debug);
    } else if level == Level::WARN {
        access_log!(warn);
    } else {
        access_log!(error);
    }

    response
}
