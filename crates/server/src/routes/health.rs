use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": state.config.telemetry.service_name,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
    }))
}

/// Readiness check endpoint
///
/// Ready once the dataset can be obtained. With the process cache this
/// also warms it, so the first `/movies` request does not pay for the load.
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let pipeline = state.pipeline.clone();
    let dataset = tokio::task::spawn_blocking(move || pipeline.dataset()).await?;

    match dataset {
        Ok(dataset) => Ok(Json(json!({
            "status": "ready",
            "service": state.config.telemetry.service_name,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "uptime_seconds": state.uptime_seconds(),
            "components": {
                "api": "ready",
                "dataset": "ready",
            },
            "movies": dataset.len(),
        }))),
        Err(err) => {
            tracing::warn!(error = %err, "Dataset not ready");
            Err(ServerError::Unavailable("dataset not loaded".to_string()))
        }
    }
}

/// Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    match (&state.metrics, state.config.metrics_enabled) {
        (Some(handle), true) => Ok((
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )),
        _ => Err(ServerError::NotFound),
    }
}
