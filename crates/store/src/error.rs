// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from the timeline store adapter. Callers match on the variant
/// rather than the message.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store::connect: unreachable within deadline: {0}")]
    ConnectTimeout(String),

    #[error("store::migrate: {0}")]
    Migration(String),

    #[error("store::create_timeline: transaction start failed: {0}")]
    TransactionStartFailed(String),

    #[error("store::create_timeline: insert failed: {0}")]
    InsertFailed(String),

    #[error("store::load_events_between: select failed: {0}")]
    SelectFailed(String),
}
