// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from `Cache::hydrate`. Callers match on the variant rather than
/// the message.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache::hydrate: broker unreachable")]
    BrokerUnreachable,

    #[error("cache::hydrate: read message: {0}")]
    ReadMessage(String),

    #[error("cache::hydrate: parse message: {0}")]
    ParseMessage(String),
}
