// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire DTOs for the query API. Timestamps are RFC3339 strings on the
//! wire; the HTTP layer converts to/from the store's millisecond
//! representation.

use serde::{Deserialize, Serialize};

/// One event as it appears in a request or response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDeviceEvent {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(rename = "eventType")]
    pub event_type: String,
    pub timestamp: String,
}

/// `POST /timeline` request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDeviceEventsRequest {
    #[serde(default)]
    pub events: Vec<ApiDeviceEvent>,
}

/// `GET /timeline/{device_id}` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetDeviceTimelineResponse {
    pub events: Vec<ApiDeviceEvent>,
}

/// Query-string parameters for `GET /timeline/{device_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineRangeQuery {
    pub start: String,
    pub end: String,
}
