// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dvln-worker: the generic cooperative driver that repeatedly invokes a
//! processor until cancelled, built as an `async_trait` capability over a
//! `tokio_util::sync::CancellationToken`.

use std::fmt;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// A single processing step a `Worker` repeatedly drives. Implemented by
/// the cleaner and packer processors.
#[async_trait]
pub trait Processor: Send + Sync {
    type Error: fmt::Display + Send;

    async fn process_message(&self, cancel: &CancellationToken) -> Result<(), Self::Error>;
}

/// Drives a `Processor` until `cancel` fires.
///
/// Per-iteration errors are logged and do not stop the loop: a malformed
/// record or a transient broker hiccup must not kill the whole consumer.
/// Only cancellation stops it.
pub struct Worker<P: Processor> {
    name: String,
    processor: P,
}

impl<P: Processor> Worker<P> {
    pub fn new(name: impl Into<String>, processor: P) -> Self {
        Self { name: name.into(), processor }
    }

    pub async fn run(&self, cancel: &CancellationToken) {
        info!(worker = %self.name, "worker started");
        loop {
            if cancel.is_cancelled() {
                info!(worker = %self.name, "worker stopped");
                return;
            }
            if let Err(e) = self.processor.process_message(cancel).await {
                error!(worker = %self.name, error = %e, "error processing message");
            }
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
