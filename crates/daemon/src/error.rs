// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Fatal startup errors: bad config, DB unreachable past deadline,
/// migration failure, hydration failure. Every variant here aborts the
/// process — logged at error level and an exit with a non-zero status
/// rather than unwinding through a bare `panic!`.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("daemon::config: {0}")]
    Config(#[from] dvln_core::ConfigError),

    #[error("daemon::store_init: {0}")]
    Store(#[from] dvln_store::StoreError),

    #[error("daemon::cache_hydrate: {0}")]
    Cache(#[from] dvln_cache::CacheError),

    #[error("daemon::broker: {0}")]
    Broker(#[from] dvln_broker::BrokerError),
}
