//! API route handlers
//!
//! - `health`: Liveness, readiness, and metrics
//! - `movies`: The movie listing endpoint

pub mod health;
pub mod movies;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "Movies Demo Server",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Movies Demo Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/movies",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
