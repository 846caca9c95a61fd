// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dvln-broker: the `Reader`/`Writer` capability abstraction over the
//! message bus, plus a real `rdkafka`-backed implementation and an
//! in-memory fake for tests.

pub mod capability;
pub mod error;
pub mod kafka;
pub mod message;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use capability::{Reachability, Reader, Writer};
pub use error::BrokerError;
pub use kafka::{
    wait_for_broker, KafkaReachability, KafkaReader, KafkaReaderConfig, KafkaWriter, StartPosition,
};
pub use message::BrokerMessage;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FailingWriter, FakeReachability, FakeReader, FakeTopic, FakeWriter, UnreachableBroker};
