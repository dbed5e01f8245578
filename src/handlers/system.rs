//! Service endpoints: index, health, version, hello, store diagnostics, fallback.

use crate::response::error_body;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
pub struct HealthBody {
    status: &'static str,
    database: &'static str,
}

/// GET /: endpoint listing.
pub async fn index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Counter API",
        "endpoints": {
            "health": "/health",
            "hello": "/api/hello",
            "dbTest": "/api/db/test",
            "counter": "/api/counter",
            "openapi": "/openapi.json"
        }
    }))
}

/// GET /health: 200 when the store answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthBody>) {
    match state.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthBody {
                status: "healthy",
                database: "connected",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthBody {
                    status: "unhealthy",
                    database: "disconnected",
                }),
            )
        }
    }
}

pub async fn version() -> Json<serde_json::Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn hello() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello from the counter backend!" }))
}

/// GET /api/db/test: store clock and version.
pub async fn db_test(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match state.store().diagnostics().await {
        Ok(info) => (StatusCode::OK, Json(json!({ "success": true, "data": info }))),
        Err(e) => {
            tracing::error!(error = %e, "store diagnostics failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "store unavailable" })),
            )
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    error_body(StatusCode::NOT_FOUND, "not found")
}

/// The body limit layer answers 413 in plain text; give it the `{error}` shape.
pub async fn json_payload_too_large(resp: Response) -> Response {
    let is_json = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if resp.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
        return error_body(StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
    }
    resp
}
