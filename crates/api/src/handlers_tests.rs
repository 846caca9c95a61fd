// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use dvln_store::Store;

use crate::router::build_router;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_always_returns_200_ok() {
    // `health` touches no state, so a direct call is enough — no pool needed.
    let response = crate::handlers::health().await;
    assert_eq!(response, "OK");
}

#[sqlx::test(migrations = "../store/migrations")]
async fn post_then_get_round_trips(pool: PgPool) {
    let app = build_router(Store::from_pool(pool));

    let post_body = serde_json::json!({
        "events": [
            {"deviceID": "A", "eventType": "device_enter", "timestamp": "2024-01-01T00:00:00Z"},
            {"deviceID": "A", "eventType": "device_exit", "timestamp": "2024-01-01T00:00:10Z"},
        ]
    });
    let post_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/timeline")
                .header("content-type", "application/json")
                .body(Body::from(post_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(post_response.status(), StatusCode::CREATED);

    let get_response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/timeline/A?start=2024-01-01T00:00:00Z&end=2024-01-01T00:00:10Z")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);

    let body = body_json(get_response).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["eventType"], "device_enter");
    assert_eq!(events[1]["eventType"], "device_exit");
}

#[sqlx::test(migrations = "../store/migrations")]
async fn empty_batch_returns_201_with_no_side_effects(pool: PgPool) {
    let app = build_router(Store::from_pool(pool));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/timeline")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::json!({"events": []}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let get_response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/timeline/anyone?start=1970-01-01T00:00:00Z&end=2100-01-01T00:00:00Z")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(get_response).await;
    assert!(body["events"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../store/migrations")]
async fn post_with_invalid_timestamp_returns_400(pool: PgPool) {
    let app = build_router(Store::from_pool(pool));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/timeline")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "events": [{"deviceID": "A", "eventType": "device_enter", "timestamp": "not-a-date"}]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../store/migrations")]
async fn get_with_invalid_timestamp_returns_400(pool: PgPool) {
    let app = build_router(Store::from_pool(pool));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/timeline/A?start=not-a-date&end=2024-01-01T00:00:00Z")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../store/migrations")]
async fn start_after_end_returns_empty_list(pool: PgPool) {
    let app = build_router(Store::from_pool(pool));

    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/timeline")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "events": [{"deviceID": "A", "eventType": "device_enter", "timestamp": "2024-01-01T00:00:00Z"}]
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/timeline/A?start=2024-01-02T00:00:00Z&end=2024-01-01T00:00:00Z")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["events"].as_array().unwrap().is_empty());
}
