//! Counter resource routes, mounted under `/api`.

use crate::handlers::counter::{get_counter, increment_counter, reset_counter, set_counter};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn counter_routes(state: AppState) -> Router {
    Router::new()
        .route("/counter", get(get_counter).put(set_counter))
        .route("/counter/increment", post(increment_counter))
        .route("/counter/reset", post(reset_counter))
        .with_state(state)
}
