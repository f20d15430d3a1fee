//! Venue request handlers.

use crate::api::doc::VENUE_TAG;
use crate::api::dto::{
    ErrorResponse, EventDetailViewResponse, MessageResponse, VenueRequest, VenueResponse,
};
use crate::error::AppResult;
use crate::models::EventDetailFilter;
use crate::state::AppState;
use crate::utils::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates venue routes.
pub fn venue_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_venues, create_venue))
        .routes(routes!(get_venue, update_venue, delete_venue))
        .routes(routes!(list_venue_event_details))
}

/// POST /venues - Create a venue
#[utoipa::path(
    post,
    path = "/",
    tag = VENUE_TAG,
    request_body = VenueRequest,
    responses(
        (status = 201, description = "Venue created", body = VenueResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse)
    )
)]
async fn create_venue(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VenueRequest>,
) -> AppResult<(StatusCode, Json<VenueResponse>)> {
    info!(venue_name = %req.venue_name, "Creating venue");
    let record = state.services.venues.save(None, req.into_new_venue()).await?;
    Ok((StatusCode::CREATED, Json(VenueResponse::from(record))))
}

/// PUT /venues/{id} - Replace a venue
#[utoipa::path(
    put,
    path = "/{id}",
    tag = VENUE_TAG,
    params(
        ("id" = i64, Path, description = "Venue ID")
    ),
    request_body = VenueRequest,
    responses(
        (status = 200, description = "Venue updated", body = VenueResponse),
        (status = 404, description = "Venue not found", body = ErrorResponse)
    )
)]
async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<VenueRequest>,
) -> AppResult<Json<VenueResponse>> {
    info!(venue_id = id, "Updating venue");
    let record = state
        .services
        .venues
        .save(Some(id), req.into_new_venue())
        .await?;
    Ok(Json(VenueResponse::from(record)))
}

/// GET /venues - List all venues
#[utoipa::path(
    get,
    path = "/",
    tag = VENUE_TAG,
    responses(
        (status = 200, description = "All venues", body = Vec<VenueResponse>),
        (status = 404, description = "No venues exist", body = ErrorResponse)
    )
)]
async fn list_venues(State(state): State<AppState>) -> AppResult<Json<Vec<VenueResponse>>> {
    info!("Listing venues");
    let records = state.services.venues.list().await?;
    Ok(Json(records.into_iter().map(VenueResponse::from).collect()))
}

/// GET /venues/{id} - Get a venue
#[utoipa::path(
    get,
    path = "/{id}",
    tag = VENUE_TAG,
    params(
        ("id" = i64, Path, description = "Venue ID")
    ),
    responses(
        (status = 200, description = "Venue found", body = VenueResponse),
        (status = 404, description = "Venue not found", body = ErrorResponse)
    )
)]
async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<VenueResponse>> {
    info!(venue_id = id, "Fetching venue");
    let record = state.services.venues.get(id).await?;
    Ok(Json(VenueResponse::from(record)))
}

/// DELETE /venues/{id} - Delete a venue without event details
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = VENUE_TAG,
    params(
        ("id" = i64, Path, description = "Venue ID")
    ),
    responses(
        (status = 200, description = "Venue deleted", body = MessageResponse),
        (status = 404, description = "Venue not found", body = ErrorResponse),
        (status = 405, description = "Venue still hosts event details", body = ErrorResponse)
    )
)]
async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    info!(venue_id = id, "Deleting venue");
    let message = state.services.venues.delete(id).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /venues/{id}/event-details - List event details held at a venue
#[utoipa::path(
    get,
    path = "/{id}/event-details",
    tag = VENUE_TAG,
    params(
        ("id" = i64, Path, description = "Venue ID")
    ),
    responses(
        (status = 200, description = "Event details at the venue", body = Vec<EventDetailViewResponse>),
        (status = 404, description = "No event details at the venue", body = ErrorResponse)
    )
)]
async fn list_venue_event_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<EventDetailViewResponse>>> {
    info!(venue_id = id, "Listing event details by venue");
    let views = state
        .services
        .event_details
        .list(EventDetailFilter::VenueId(id))
        .await?;
    Ok(Json(
        views.into_iter().map(EventDetailViewResponse::from).collect(),
    ))
}
