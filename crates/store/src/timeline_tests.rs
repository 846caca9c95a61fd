// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use sqlx::PgPool;

use dvln_core::{DeviceEvent, EventType};

use super::*;

fn event(device_id: &str, event_type: EventType, timestamp: i64) -> DeviceEvent {
    DeviceEvent { device_id: device_id.to_string(), event_type, timestamp }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_then_load_returns_inserted_events_in_range(pool: PgPool) {
    let store = Store::from_pool(pool);
    let events = vec![
        event("dev1", EventType::DeviceEnter, 1_000),
        event("dev1", EventType::DeviceExit, 1_010),
    ];

    store.create_timeline(&events).await.unwrap();

    let loaded = store.load_events_between("dev1", 1_000, 1_010).await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].event_type, EventType::DeviceEnter);
    assert_eq!(loaded[1].event_type, EventType::DeviceExit);
}

#[sqlx::test(migrations = "./migrations")]
async fn load_orders_results_by_timestamp_ascending(pool: PgPool) {
    let store = Store::from_pool(pool);
    let events = vec![
        event("dev1", EventType::DeviceExit, 300),
        event("dev1", EventType::DeviceEnter, 100),
        event("dev1", EventType::DeviceExit, 200),
    ];

    store.create_timeline(&events).await.unwrap();

    let loaded = store.load_events_between("dev1", 0, 1_000).await.unwrap();
    let timestamps: Vec<i64> = loaded.iter().map(|e| e.timestamp).collect();
    assert_eq!(timestamps, vec![100, 200, 300]);
}

#[sqlx::test(migrations = "./migrations")]
async fn range_is_inclusive_on_both_ends(pool: PgPool) {
    let store = Store::from_pool(pool);
    let events = vec![
        event("dev1", EventType::DeviceEnter, 100),
        event("dev1", EventType::DeviceExit, 200),
        event("dev1", EventType::DeviceEnter, 300),
    ];
    store.create_timeline(&events).await.unwrap();

    let loaded = store.load_events_between("dev1", 100, 200).await.unwrap();
    assert_eq!(loaded.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn start_after_end_returns_empty(pool: PgPool) {
    let store = Store::from_pool(pool);
    store.create_timeline(&[event("dev1", EventType::DeviceEnter, 100)]).await.unwrap();

    let loaded = store.load_events_between("dev1", 200, 100).await.unwrap();
    assert!(loaded.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn no_rows_for_device_is_a_successful_empty_result(pool: PgPool) {
    let store = Store::from_pool(pool);

    let loaded = store.load_events_between("missing-device", 0, i64::MAX).await.unwrap();
    assert!(loaded.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_batch_has_no_side_effects(pool: PgPool) {
    let store = Store::from_pool(pool.clone());

    store.create_timeline(&[]).await.unwrap();

    let loaded = store.load_events_between("anything", 0, i64::MAX).await.unwrap();
    assert!(loaded.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn store_tolerates_duplicate_inserts(pool: PgPool) {
    let store = Store::from_pool(pool);
    let duplicate = event("dev1", EventType::DeviceEnter, 100);

    store.create_timeline(&[duplicate.clone(), duplicate]).await.unwrap();

    let loaded = store.load_events_between("dev1", 100, 100).await.unwrap();
    assert_eq!(loaded.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn load_is_scoped_to_the_requested_device(pool: PgPool) {
    let store = Store::from_pool(pool);
    store
        .create_timeline(&[
            event("dev1", EventType::DeviceEnter, 100),
            event("dev2", EventType::DeviceEnter, 150),
        ])
        .await
        .unwrap();

    let loaded = store.load_events_between("dev1", 0, 1_000).await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].device_id, "dev1");
}
