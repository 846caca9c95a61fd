// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use dvln_store::Store;

use crate::router::build_router;

/// Serve the query API on `addr` until `cancel` fires. A fatal listener
/// error also fires `cancel`, tearing down the rest of the process.
///
/// Graceful shutdown: stops accepting new connections once `cancel` fires
/// rather than relying on process exit alone.
pub async fn serve(addr: &str, store: Store, cancel: CancellationToken) {
    let router = build_router(store);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind HTTP listener");
            cancel.cancel();
            return;
        }
    };

    info!(%addr, "query API listening");

    let shutdown = cancel.clone();
    let result = axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await;

    if let Err(e) = result {
        error!(error = %e, "HTTP server error");
        cancel.cancel();
    }
}
