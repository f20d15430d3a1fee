//! Router configuration for the API.
//!
//! Resource routers are collected into one `OpenApiRouter`, so the served
//! OpenAPI document always matches the registered handlers.

use std::time::Duration;

use axum::http::{Method, StatusCode};
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    error_envelope_middleware, logging_middleware, request_id_middleware,
};
use crate::state::AppState;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Creates the application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. Compression and CORS (outermost)
/// 2. Request ID, so every later log line can carry it
/// 3. Logging
/// 4. Error envelope, so a timed-out request still gets the JSON body
/// 5. Request timeout, closest to the handlers
///
/// # Routes
/// - `/categories`, `/venues`, `/events`, `/event-details`
/// - `/health`, `/health/ready`, `/health/live`
/// - `/swagger-ui` and `/api-docs/openapi.json`
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, openapi) = api_routes().split_for_parts();

    let router = router
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, openapi))
        .with_state(state);
    with_middleware(router, request_timeout)
}

fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(error_envelope_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
}

fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/categories", handlers::categories::category_routes())
        .nest("/venues", handlers::venues::venue_routes())
        .nest("/events", handlers::events::event_routes())
        .nest("/event-details", handlers::event_details::event_detail_routes())
        .merge(handlers::health::health_routes())
}
