//! Root endpoint handler.

use axum::Json;
use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Hello from CI/CD Pipeline!";
pub const API_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// Handler for GET /
pub async fn get_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: GREETING.to_string(),
        version: API_VERSION.to_string(),
    })
}
