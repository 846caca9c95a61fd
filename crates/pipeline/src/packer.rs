// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The packer processor: reads one message from the cleaned topic and
//! republishes it verbatim (same key, same value bytes) to the compacted
//! topic. No decoding.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use dvln_broker::{BrokerError, Reader, Writer};
use dvln_worker::Processor;

use crate::error::PackerError;

impl From<BrokerError> for PackerError {
    fn from(e: BrokerError) -> Self {
        match e {
            BrokerError::Cancelled => PackerError::Cancelled,
            other => PackerError::ReadMessage(other.to_string()),
        }
    }
}

/// Bridges the non-compacted cleaned stream to the compaction-policy-enabled
/// topic that serves as persistent state for future cache hydration.
pub struct Packer {
    reader: Arc<dyn Reader>,
    writer: Arc<dyn Writer>,
}

impl Packer {
    pub fn new(reader: Arc<dyn Reader>, writer: Arc<dyn Writer>) -> Self {
        Self { reader, writer }
    }
}

#[async_trait]
impl Processor for Packer {
    type Error = PackerError;

    async fn process_message(&self, cancel: &CancellationToken) -> Result<(), PackerError> {
        let message = self.reader.read_message(cancel).await?;
        let device_id = String::from_utf8_lossy(&message.key).into_owned();

        self.writer
            .write_messages(cancel, vec![message])
            .await
            .map_err(|e| PackerError::WriteMessage(e.to_string()))?;

        info!(device_id = %device_id, "published packed message");
        Ok(())
    }
}

#[cfg(test)]
#[path = "packer_tests.rs"]
mod tests;
