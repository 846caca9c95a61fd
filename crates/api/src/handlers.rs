// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers for the query API.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use dvln_core::{rfc3339_to_millis, DeviceEvent, EventType};
use dvln_store::Store;

use crate::contract::{
    ApiDeviceEvent, CreateDeviceEventsRequest, GetDeviceTimelineResponse, TimelineRangeQuery,
};
use crate::error::ApiError;

/// `POST /timeline`.
///
/// Parses every event's RFC3339 timestamp to milliseconds; any parse
/// failure rejects the whole batch with 400, before any row is inserted.
pub async fn create_timeline(
    State(store): State<Store>,
    Json(request): Json<CreateDeviceEventsRequest>,
) -> Result<StatusCode, ApiError> {
    let mut events = Vec::with_capacity(request.events.len());
    for event in request.events {
        let timestamp = rfc3339_to_millis(&event.timestamp).map_err(|_| ApiError::InvalidData)?;
        events.push(DeviceEvent {
            device_id: event.device_id,
            event_type: EventType::from(event.event_type),
            timestamp,
        });
    }

    store.create_timeline(&events).await?;
    Ok(StatusCode::CREATED)
}

/// `GET /timeline/{device_id}?start=<rfc3339>&end=<rfc3339>`.
pub async fn get_device_timeline(
    State(store): State<Store>,
    Path(device_id): Path<String>,
    Query(range): Query<TimelineRangeQuery>,
) -> Result<Json<GetDeviceTimelineResponse>, ApiError> {
    let start_ms = rfc3339_to_millis(&range.start).map_err(|_| ApiError::InvalidData)?;
    let end_ms = rfc3339_to_millis(&range.end).map_err(|_| ApiError::InvalidData)?;

    let events = store.load_events_between(&device_id, start_ms, end_ms).await?;

    let events = events
        .into_iter()
        .map(|event| ApiDeviceEvent {
            device_id: event.device_id,
            event_type: event.event_type.as_str().to_string(),
            timestamp: dvln_core::millis_to_rfc3339(event.timestamp),
        })
        .collect();

    Ok(Json(GetDeviceTimelineResponse { events }))
}

/// `GET /health`: always 200, body `OK`.
pub async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
