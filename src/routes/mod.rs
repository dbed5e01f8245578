//! Router assembly.

mod common;
mod counter;

pub use common::common_routes;
pub use counter::counter_routes;

use crate::handlers::system::{json_payload_too_large, not_found};
use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{middleware::map_response, routing::get, Json, Router};
use tower_http::limit::RequestBodyLimitLayer;
use utoipa::OpenApi;

/// Full application: common routes, `/api/counter*`, `/openapi.json`, JSON 404 fallback.
/// Oversized bodies get 413 with an `{error}` body.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", counter_routes(state))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(map_response(json_payload_too_large))
}
