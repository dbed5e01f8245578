//! Counter handlers: get, increment, reset, set.

use crate::error::AppError;
use crate::model::{Counter, ErrorResponse, SetCounterRequest};
use crate::response::success_ok;
use crate::service::validate_set_request;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

/// GET /api/counter: current value. Creates the row with 0 on first call.
#[utoipa::path(
    get,
    path = "/api/counter",
    tag = "counter",
    responses(
        (status = 200, description = "Current counter value", body = Counter),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn get_counter(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let counter = state.counter.get().await?;
    Ok(success_ok(counter))
}

/// POST /api/counter/increment
#[utoipa::path(
    post,
    path = "/api/counter/increment",
    tag = "counter",
    responses(
        (status = 200, description = "Counter incremented", body = Counter),
        (status = 409, description = "Counter at maximum value", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn increment_counter(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let counter = state.counter.increment().await?;
    tracing::debug!(value = counter.value, "incremented");
    Ok(success_ok(counter))
}

/// POST /api/counter/reset
#[utoipa::path(
    post,
    path = "/api/counter/reset",
    tag = "counter",
    responses(
        (status = 200, description = "Counter reset to 0", body = Counter),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn reset_counter(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let counter = state.counter.reset().await?;
    Ok(success_ok(counter))
}

/// PUT /api/counter with body `{value}`. Invalid bodies get 400 before the store is touched.
#[utoipa::path(
    put,
    path = "/api/counter",
    tag = "counter",
    request_body = SetCounterRequest,
    responses(
        (status = 200, description = "Counter updated", body = Counter),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn set_counter(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::Validation(e.body_text())
        }
    })?;
    let req = validate_set_request(&body)?;
    let counter = state.counter.set(req.value).await?;
    Ok(success_ok(counter))
}
