// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device event wire types. The raw-topic message, the cleaned-topic
//! schema envelope, and the persisted row all share the same three
//! fields (`device_id`, `event_type`, `timestamp`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed enumeration of event types recognized on the wire.
///
/// `DeviceEnter`/`DeviceExit` are the only types admitted past validation.
/// `Heartbeat`/`StatusUpdate` are accepted by the wire format but
/// always dropped. `Unknown` absorbs anything else so deserialization never
/// fails on an unexpected string — rejection is the cleaner's job, not
/// serde's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    DeviceEnter,
    DeviceExit,
    Heartbeat,
    StatusUpdate,
    Unknown(String),
}

impl EventType {
    pub const DEVICE_ENTER: &'static str = "device_enter";
    pub const DEVICE_EXIT: &'static str = "device_exit";
    pub const HEARTBEAT: &'static str = "heartbeat";
    pub const STATUS_UPDATE: &'static str = "status_update";

    /// True for the two types the cleaner is willing to admit.
    pub fn is_admissible(&self) -> bool {
        matches!(self, EventType::DeviceEnter | EventType::DeviceExit)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventType::DeviceEnter => Self::DEVICE_ENTER,
            EventType::DeviceExit => Self::DEVICE_EXIT,
            EventType::Heartbeat => Self::HEARTBEAT,
            EventType::StatusUpdate => Self::STATUS_UPDATE,
            EventType::Unknown(s) => s,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        match s {
            Self::DEVICE_ENTER => EventType::DeviceEnter,
            Self::DEVICE_EXIT => EventType::DeviceExit,
            Self::HEARTBEAT => EventType::Heartbeat,
            Self::STATUS_UPDATE => EventType::StatusUpdate,
            other => EventType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        EventType::from(s.as_str())
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        t.as_str().to_string()
    }
}

impl Serialize for EventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(EventType::from(s))
    }
}

/// The raw-topic and persisted-row payload: one device's event.
///
/// Immutable once published. `timestamp` is integer milliseconds since
/// Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEvent {
    pub device_id: String,
    pub event_type: EventType,
    pub timestamp: i64,
}

/// A single field descriptor in the static schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Static struct-schema descriptor named by the cleaned-topic contract.
/// There is exactly one instance of this shape; it never varies at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub name: String,
    pub optional: bool,
    pub fields: Vec<SchemaField>,
}

impl Schema {
    /// The fixed "DeviceUpdate" schema the cleaned/compacted topics carry.
    pub fn device_update() -> Self {
        Schema {
            schema_type: "struct".to_string(),
            name: "DeviceUpdate".to_string(),
            optional: false,
            fields: vec![
                SchemaField { field: "timestamp".to_string(), field_type: "int64".to_string() },
                SchemaField { field: "device_id".to_string(), field_type: "string".to_string() },
                SchemaField { field: "event_type".to_string(), field_type: "string".to_string() },
            ],
        }
    }
}

/// The cleaned-topic record: a payload wrapped with the static schema
/// descriptor, for schema-aware downstream sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEnvelope {
    pub schema: Schema,
    pub payload: DeviceEvent,
}

impl SchemaEnvelope {
    pub fn wrap(payload: DeviceEvent) -> Self {
        SchemaEnvelope { schema: Schema::device_update(), payload }
    }
}

/// Per-device memory record.
///
/// Only constructed once a device has been observed; there is no "empty"
/// state; absence is represented by the cache not containing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    pub last_event_type: EventType,
    pub last_timestamp_seen: i64,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
