// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The cleaner processor: decode, validate against the cache, wrap in a
//! schema envelope, publish keyed by device id, then — only on a
//! successful publish — advance the cache.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use dvln_broker::{BrokerError, BrokerMessage, Reader, Writer};
use dvln_cache::Cache;
use dvln_core::{DeviceEvent, DeviceState, SchemaEnvelope};
use dvln_worker::Processor;

use crate::error::CleanerError;

impl From<BrokerError> for CleanerError {
    fn from(e: BrokerError) -> Self {
        match e {
            BrokerError::Cancelled => CleanerError::Cancelled,
            other => CleanerError::ReadMessage(other.to_string()),
        }
    }
}

/// Why an event was dropped instead of published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    InvalidEvent,
    UnorderedEvent,
    DuplicateEvent,
}

impl DropReason {
    fn as_str(self) -> &'static str {
        match self {
            DropReason::InvalidEvent => "invalid event",
            DropReason::UnorderedEvent => "out of order event",
            DropReason::DuplicateEvent => "duplicate event",
        }
    }
}

/// Consumes the raw topic, validates against the cache, and republishes
/// survivors to the cleaned topic.
pub struct Cleaner {
    reader: Arc<dyn Reader>,
    writer: Arc<dyn Writer>,
    cache: Arc<Cache>,
}

impl Cleaner {
    pub fn new(reader: Arc<dyn Reader>, writer: Arc<dyn Writer>, cache: Arc<Cache>) -> Self {
        Self { reader, writer, cache }
    }

    /// `None` admits the event, `Some(reason)` says why it was dropped.
    fn validate(&self, event: &DeviceEvent) -> Option<DropReason> {
        if !event.event_type.is_admissible() {
            return Some(DropReason::InvalidEvent);
        }
        if let Some(state) = self.cache.get(&event.device_id) {
            if event.timestamp < state.last_timestamp_seen {
                return Some(DropReason::UnorderedEvent);
            }
            if event.event_type == state.last_event_type {
                return Some(DropReason::DuplicateEvent);
            }
        }
        None
    }
}

#[async_trait]
impl Processor for Cleaner {
    type Error = CleanerError;

    async fn process_message(&self, cancel: &CancellationToken) -> Result<(), CleanerError> {
        let message = self.reader.read_message(cancel).await?;

        let payload: DeviceEvent = match serde_json::from_slice(&message.value) {
            Ok(payload) => payload,
            Err(e) => return Err(CleanerError::JsonParse(e.to_string())),
        };

        if let Some(reason) = self.validate(&payload) {
            info!(
                device_id = %payload.device_id,
                event_type = %payload.event_type,
                timestamp = payload.timestamp,
                reason = reason.as_str(),
                "dropping invalid/out-of-order/duplicate event"
            );
            return Ok(());
        }

        let envelope = SchemaEnvelope::wrap(payload.clone());
        let value = serde_json::to_vec(&envelope)
            .map_err(|e| CleanerError::JsonParse(format!("marshal envelope: {e}")))?;
        let out = BrokerMessage::new(payload.device_id.as_bytes().to_vec(), value);

        self.writer
            .write_messages(cancel, vec![out])
            .await
            .map_err(|e| CleanerError::WriteMessage(e.to_string()))?;

        // Cache update only after successful publish: a failed publish
        // must not advance the cache, or a retry would be wrongly
        // classified as a duplicate.
        self.cache.set(
            payload.device_id.clone(),
            DeviceState { last_event_type: payload.event_type, last_timestamp_seen: payload.timestamp },
        );
        info!(device_id = %payload.device_id, "published cleaned message");

        Ok(())
    }
}

#[cfg(test)]
#[path = "cleaner_tests.rs"]
mod tests;
