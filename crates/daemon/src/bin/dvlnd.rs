// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device Event Pipeline daemon (`dvlnd`). Boots the state cache, the
//! cleaner/packer processors, and the query API under one cancellation
//! signal.

use dvln_core::Config;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    setup_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = dvln_daemon::run(config).await {
        error!(error = %e, "fatal startup error");
        std::process::exit(1);
    }
}

/// Structured JSON logging initialized first, controlled by `RUST_LOG`
/// (default `info`).
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().json()).init();
}
