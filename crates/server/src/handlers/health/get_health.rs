use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe. Always healthy while the process can answer.
pub async fn get_health() -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "healthy".to_string(),
    };

    (StatusCode::OK, Json(response))
}
