// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The timeline store adapter: connect-with-retry then migrate at init,
//! an all-or-nothing batch insert, and a range-select ordered ascending
//! with "no rows" as a successful empty result.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tokio::time::Instant;
use tracing::{info, warn};

use dvln_core::{DeviceEvent, EventType};

use crate::error::StoreError;

const CONNECT_RETRY_INTERVAL: Duration = Duration::from_secs(1);
const CONNECT_RETRY_DEADLINE: Duration = Duration::from_secs(15);

/// Postgres-backed persistence for cleaned device events.
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect with retry (1s interval, 15s total deadline) then run
    /// pending migrations, treating "no pending migrations" as success.
    pub async fn init(conn_string: &str) -> Result<Self, StoreError> {
        let pool = connect_with_retry(conn_string, CONNECT_RETRY_INTERVAL, CONNECT_RETRY_DEADLINE).await?;
        info!("running database migrations");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Construct directly from an existing pool, for tests that have
    /// already connected and migrated.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction, insert every event, commit on complete success,
    /// roll back on any per-row failure. No per-row isolation.
    pub async fn create_timeline(&self, events: &[DeviceEvent]) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::TransactionStartFailed(e.to_string()))?;

        for event in events {
            let result = sqlx::query(
                "INSERT INTO device_events_cleaned (device_id, event_type, timestamp) \
                 VALUES ($1, $2, $3)",
            )
            .bind(&event.device_id)
            .bind(event.event_type.as_str())
            .bind(event.timestamp)
            .execute(&mut *tx)
            .await;

            if let Err(e) = result {
                // `tx` drops here without an explicit rollback call, which
                // rolls back on drop.
                return Err(StoreError::InsertFailed(e.to_string()));
            }
        }

        tx.commit().await.map_err(|e| StoreError::InsertFailed(e.to_string()))?;
        Ok(())
    }

    /// Range-select events for `device_id` with `timestamp` in
    /// `[start_ms, end_ms]` inclusive, ordered ascending. "No rows" is a
    /// successful empty result, not an error.
    pub async fn load_events_between(
        &self,
        device_id: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<DeviceEvent>, StoreError> {
        let rows = sqlx::query(
            "SELECT device_id, event_type, timestamp FROM device_events_cleaned \
             WHERE device_id = $1 AND timestamp >= $2 AND timestamp <= $3 \
             ORDER BY timestamp ASC",
        )
        .bind(device_id)
        .bind(start_ms)
        .bind(end_ms)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::SelectFailed(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|row| DeviceEvent {
                device_id: row.get::<String, _>("device_id"),
                event_type: EventType::from(row.get::<String, _>("event_type")),
                timestamp: row.get::<i64, _>("timestamp"),
            })
            .collect())
    }
}

async fn connect_with_retry(
    conn_string: &str,
    interval: Duration,
    deadline: Duration,
) -> Result<PgPool, StoreError> {
    let start = Instant::now();
    loop {
        match PgPoolOptions::new().max_connections(10).connect(conn_string).await {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                warn!(error = %e, "store not ready, retrying");
                if start.elapsed() >= deadline {
                    return Err(StoreError::ConnectTimeout(e.to_string()));
                }
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
