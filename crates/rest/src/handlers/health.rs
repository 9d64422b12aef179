//! Health check endpoint handler.
//!
//! Provides a simple health check endpoint for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Always answers 200 while the process is serving. Backend reachability is
/// reported in the body: `status` is `ok` when the active backend answers
/// and `degraded` otherwise, with the probe message in `detail`.
///
/// # HTTP Request
///
/// `GET /healthcheck`
///
/// # Response
///
/// ```json
/// {"status": "ok", "timestamp": "2025-07-23T10:30:15.123456-05:00",
///  "backend": "file", "database": "connected"}
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Response {
    debug!("Processing health check request");

    let repository = state.repository();
    let ping = repository.ping().await;

    let mut body = json!({
        "status": if ping.connected { "ok" } else { "degraded" },
        "timestamp": chrono::Local::now().to_rfc3339(),
        "backend": repository.backend_name(),
        "database": if ping.connected { "connected" } else { "disconnected" },
    });
    if !ping.connected {
        body["detail"] = json!(ping.message);
    }

    (StatusCode::OK, Json(body)).into_response()
}
