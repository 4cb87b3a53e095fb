/// Liveness endpoints
///
/// `GET /` and `GET /health` answer without touching the platform; they only
/// confirm the process is up and serving requests.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,
}

/// Root liveness handler
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "TaskFlow API running" }))
}

/// Health check handler
///
/// # Example
///
/// ```text
/// GET /health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
