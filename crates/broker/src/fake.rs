// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory `Reader`/`Writer` fakes for tests. State lives behind an
//! `Arc<Mutex<..>>` so a test can hand one half to the component under
//! test and keep the other half to assert against.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use std::time::Duration;

use crate::capability::{Reachability, Reader, Writer};
use crate::error::BrokerError;
use crate::message::BrokerMessage;

#[derive(Debug, Default)]
struct FakeTopicState {
    queue: VecDeque<BrokerMessage>,
    published: Vec<BrokerMessage>,
}

/// A topic shared between a `FakeReader` and the test driving it: push
/// messages with `push`, then hand `reader()` to the component under test.
#[derive(Clone, Default)]
pub struct FakeTopic {
    state: Arc<Mutex<FakeTopicState>>,
}

impl FakeTopic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, message: BrokerMessage) {
        self.state.lock().queue.push_back(message);
    }

    pub fn reader(&self) -> FakeReader {
        FakeReader { state: self.state.clone() }
    }

    pub fn writer(&self) -> FakeWriter {
        FakeWriter { state: self.state.clone() }
    }

    /// Messages a `FakeWriter` wrote, in write order.
    pub fn published(&self) -> Vec<BrokerMessage> {
        self.state.lock().published.clone()
    }
}

/// A `Reader` over a `FakeTopic`'s queue. Once the queue is drained, `lag()`
/// reports zero and `read_message` blocks until cancelled, matching a real
/// consumer caught up to the tail.
pub struct FakeReader {
    state: Arc<Mutex<FakeTopicState>>,
}

#[async_trait]
impl Reader for FakeReader {
    async fn read_message(&self, cancel: &CancellationToken) -> Result<BrokerMessage, BrokerError> {
        loop {
            if let Some(message) = self.state.lock().queue.pop_front() {
                return Ok(message);
            }
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(BrokerError::Cancelled),
                _ = tokio::time::sleep(std::time::Duration::from_millis(5)) => {}
            }
        }
    }

    fn lag(&self) -> i64 {
        self.state.lock().queue.len() as i64
    }

    async fn close(&self) {}
}

/// A `Writer` that records every message it is asked to write, for
/// assertions in `dvln-pipeline` tests.
pub struct FakeWriter {
    state: Arc<Mutex<FakeTopicState>>,
}

#[async_trait]
impl Writer for FakeWriter {
    async fn write_messages(
        &self,
        _cancel: &CancellationToken,
        messages: Vec<BrokerMessage>,
    ) -> Result<(), BrokerError> {
        self.state.lock().published.extend(messages);
        Ok(())
    }

    async fn close(&self) {}
}

/// A `Writer` that always fails, for testing that the cache only updates
/// after a successful publish.
pub struct FailingWriter;

#[async_trait]
impl Writer for FailingWriter {
    async fn write_messages(
        &self,
        _cancel: &CancellationToken,
        _messages: Vec<BrokerMessage>,
    ) -> Result<(), BrokerError> {
        Err(BrokerError::WriteMessage("fake writer configured to fail".to_string()))
    }

    async fn close(&self) {}
}

/// A `Reachability` that always reports ready immediately, for tests that
/// don't care about broker-dial retry behavior.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeReachability;

#[async_trait]
impl Reachability for FakeReachability {
    async fn wait_ready(&self, _deadline: Duration, _interval: Duration) -> Result<(), BrokerError> {
        Ok(())
    }
}

/// A `Reachability` that always reports the broker unreachable, for testing
/// the `BrokerUnreachable` deadline path without waiting out a real deadline.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnreachableBroker;

#[async_trait]
impl Reachability for UnreachableBroker {
    async fn wait_ready(&self, _deadline: Duration, _interval: Duration) -> Result<(), BrokerError> {
        Err(BrokerError::BrokerUnreachable)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
