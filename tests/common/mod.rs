//! Shared harness for router-level tests against PostgreSQL.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::OnceCell;
use tower::ServiceExt;
use uuid::Uuid;

use event_management::AppState;
use event_management::api::routes::create_router;
use event_management::config::DatabaseConfig;
use event_management::db::{establish_async_connection_pool, run_pending_migrations};

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Builds the full router on `TEST_DATABASE_URL`, or `None` when it is unset.
pub async fn app() -> Option<Router> {
    dotenvy::dotenv().ok();
    let url = std::env::var("TEST_DATABASE_URL").ok()?;

    MIGRATED
        .get_or_init(|| async {
            run_pending_migrations(&url)
                .await
                .expect("failed to migrate test database");
        })
        .await;

    let config = DatabaseConfig {
        url,
        max_connections: 4,
        ..Default::default()
    };
    let pool = establish_async_connection_pool(&config)
        .await
        .expect("failed to open test pool");
    Some(create_router(AppState::new(pool), Duration::from_secs(30)))
}

/// Suffix that keeps names unique across concurrently running tests.
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn create_category(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/categories",
        Some(serde_json::json!({ "categoryName": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["categoryId"].as_i64().expect("categoryId")
}

pub async fn create_venue(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/venues",
        Some(serde_json::json!({ "venueName": name, "capacity": 120, "venueCity": "Austin" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["venueId"].as_i64().expect("venueId")
}

pub async fn create_event(app: &Router, name: &str, categories: &[&str]) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/events",
        Some(serde_json::json!({ "eventName": name, "categories": categories })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["eventId"].as_i64().expect("eventId")
}

pub async fn create_event_detail(app: &Router, event_id: i64, venue_id: i64, date: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        &format!("/event-details?event_id={}&venue_id={}", event_id, venue_id),
        Some(serde_json::json!({
            "description": "Opening night",
            "date": date,
            "startTime": "19:00:00",
            "endTime": "22:00:00",
            "isFree": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["eventDetailId"].as_i64().expect("eventDetailId")
}
