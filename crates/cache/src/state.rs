// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory per-device state cache, hydrated from the compacted topic by
//! replaying it to lag zero before any live consumption begins.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

use dvln_broker::{BrokerError, Reachability, Reader};
use dvln_core::{DeviceState, SchemaEnvelope};

use crate::error::CacheError;

const BROKER_WAIT_DEADLINE: Duration = Duration::from_secs(30);
const BROKER_WAIT_INTERVAL: Duration = Duration::from_secs(5);
const READ_DEADLINE: Duration = Duration::from_secs(5);

/// Mapping from device id to its most-recently-observed state. Reads and
/// writes are confined to the cleaner after hydration completes; the
/// internal mutex exists so the cache can be shared behind an `Arc`
/// without the caller having to reason about it, not because concurrent
/// access is expected today.
#[derive(Default)]
pub struct Cache {
    store: Mutex<HashMap<String, DeviceState>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `get(device_id) -> (state, present)`.
    pub fn get(&self, device_id: &str) -> Option<DeviceState> {
        self.store.lock().get(device_id).cloned()
    }

    pub fn set(&self, device_id: impl Into<String>, state: DeviceState) {
        self.store.lock().insert(device_id.into(), state);
    }

    pub fn delete(&self, device_id: &str) {
        self.store.lock().remove(device_id);
    }

    /// Diagnostic dump of the full cache, logged at info level on startup
    /// right after hydration.
    pub fn dump(&self) {
        for (device_id, state) in self.store.lock().iter() {
            info!(
                device_id = %device_id,
                last_event_type = %state.last_event_type,
                last_timestamp_seen = state.last_timestamp_seen,
                "cache dump"
            );
        }
    }

    /// Rebuild the cache by replaying the compacted topic to lag zero.
    /// Must complete before any processor starts consuming the cleaner's
    /// input, or the cleaner would see an empty cache and wrongly admit
    /// duplicates/stale events.
    pub async fn hydrate(
        &self,
        reader: &dyn Reader,
        probe: &dyn Reachability,
        cancel: &CancellationToken,
    ) -> Result<(), CacheError> {
        info!("pinging broker to ensure connectivity before hydration");
        probe
            .wait_ready(BROKER_WAIT_DEADLINE, BROKER_WAIT_INTERVAL)
            .await
            .map_err(|_| CacheError::BrokerUnreachable)?;

        info!("starting cache hydration");
        loop {
            if cancel.is_cancelled() {
                info!("cache hydrate stopped by cancellation");
                return Ok(());
            }

            match tokio::time::timeout(READ_DEADLINE, reader.read_message(cancel)).await {
                Err(_elapsed) => {
                    info!("cache hydration complete - no messages in cache");
                    return Ok(());
                }
                Ok(Err(BrokerError::Cancelled)) => {
                    info!("cache hydrate stopped by cancellation");
                    return Ok(());
                }
                Ok(Err(e)) => return Err(CacheError::ReadMessage(e.to_string())),
                Ok(Ok(message)) => {
                    let envelope: SchemaEnvelope = serde_json::from_slice(&message.value)
                        .map_err(|e| CacheError::ParseMessage(e.to_string()))?;
                    self.set(
                        envelope.payload.device_id.clone(),
                        DeviceState {
                            last_event_type: envelope.payload.event_type,
                            last_timestamp_seen: envelope.payload.timestamp,
                        },
                    );

                    if reader.lag() == 0 {
                        info!("cache hydration complete - lag is zero");
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
