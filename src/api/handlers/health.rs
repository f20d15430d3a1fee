//! Health check endpoint handlers.
//!
//! Health checks go straight to the connection pool rather than through
//! the services, so a broken pool shows up even when no resource is touched.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{DatabaseCheck, HealthReport, HealthStatus};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use std::time::Instant;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Report with the database round trip
/// - `GET /health/ready` - Readiness check
/// - `GET /health/live` - Liveness check
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Reports overall health, which follows database connectivity.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Database reachable", body = HealthReport),
        (status = 503, description = "Database unreachable", body = HealthReport)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = HealthReport::new(check_database(&state).await);
    (status_code(report.status), Json(report))
}

/// Readiness check; fails while the database is unreachable.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    status_code(check_database(&state).await.status)
}

/// Liveness check; answers as long as the process serves requests.
#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn status_code(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    }
}

async fn check_database(state: &AppState) -> DatabaseCheck {
    use diesel_async::RunQueryDsl;

    let started = Instant::now();
    let result = match state.db_pool.get().await {
        Ok(mut conn) => diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(drop)
            .map_err(|e| format!("Query failed: {}", e)),
        Err(e) => Err(format!("Connection failed: {}", e)),
    };
    let latency_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(()) => DatabaseCheck {
            status: HealthStatus::Up,
            latency_ms,
            error: None,
        },
        Err(error) => {
            tracing::warn!(%error, "Database health check failed");
            DatabaseCheck {
                status: HealthStatus::Down,
                latency_ms,
                error: Some(error),
            }
        }
    }
}
