//! Common routes: index, health, version, hello, store diagnostics.

use crate::handlers::system::{db_test, health, hello, index, version};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/info", get(version))
        .route("/api/hello", get(hello))
        .route("/api/db/test", get(db_test))
        .with_state(state)
}
