// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Broker capability traits. Every processor, the cache, and tests depend
//! only on these two traits, never on `rdkafka` directly. The concrete
//! client is injected at construction time.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::BrokerError;
use crate::message::BrokerMessage;

/// Read one message at a time from a topic.
///
/// `read_message` blocks until a message is available or `cancel` fires, in
/// which case it returns `Err(BrokerError::Cancelled)`. Deadline-bounded
/// reads (used by cache hydration) are layered on top with
/// `tokio::time::timeout` at the call site, not inside this trait.
#[async_trait]
pub trait Reader: Send + Sync {
    async fn read_message(&self, cancel: &CancellationToken) -> Result<BrokerMessage, BrokerError>;

    /// Number of unread messages between the reader's position and the
    /// topic's tail.
    fn lag(&self) -> i64;

    async fn close(&self);
}

/// Write messages to a topic.
#[async_trait]
pub trait Writer: Send + Sync {
    async fn write_messages(
        &self,
        cancel: &CancellationToken,
        messages: Vec<BrokerMessage>,
    ) -> Result<(), BrokerError>;

    async fn close(&self);
}

/// Probe broker reachability, separate from any one topic's reader/writer.
/// Kept as its own capability so hydration tests can inject an
/// always-ready fake instead of dialing a real broker.
#[async_trait]
pub trait Reachability: Send + Sync {
    async fn wait_ready(&self, deadline: Duration, interval: Duration) -> Result<(), BrokerError>;
}
