// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::routing::{get, post};
use axum::Router;
use dvln_store::Store;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_timeline, get_device_timeline, health};

/// Build the query API's router, with request tracing layered on.
pub fn build_router(store: Store) -> Router {
    Router::new()
        .route("/timeline", post(create_timeline))
        .route("/timeline/:device_id", get(get_device_timeline))
        .route("/health", get(health))
        .with_state(store)
        .layer(TraceLayer::new_for_http())
}
