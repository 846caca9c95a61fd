// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from the broker capability. Callers `matches!` on the variant
/// rather than the message.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("broker: read message: {0}")]
    ReadMessage(String),

    #[error("broker: write message: {0}")]
    WriteMessage(String),

    #[error("broker: unreachable")]
    BrokerUnreachable,

    #[error("broker: operation cancelled")]
    Cancelled,
}
