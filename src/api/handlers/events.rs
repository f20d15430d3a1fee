//! Event request handlers.

use std::collections::HashMap;

use crate::api::doc::EVENT_TAG;
use crate::api::dto::{
    EVENT_CATEGORY_QUERY_KEYS, ErrorResponse, EventCategoryFilter, EventCategoryQuery,
    EventDetailRequest, EventDetailResponse, EventDetailViewResponse, EventRequest, EventResponse,
    MessageResponse, reject_unknown_params,
};
use crate::error::AppResult;
use crate::models::EventDetailFilter;
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::{info, warn};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates event routes.
pub fn event_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_events, create_event))
        .routes(routes!(list_events_by_category))
        .routes(routes!(get_event, update_event, delete_event))
        .routes(routes!(list_event_details_of_event))
        .routes(routes!(create_event_detail_for_event))
}

/// POST /events - Create an event linked to existing categories
#[utoipa::path(
    post,
    path = "/",
    tag = EVENT_TAG,
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 405, description = "Categories missing or unknown", body = ErrorResponse)
    )
)]
async fn create_event(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<EventRequest>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    info!(event_name = %req.event_name, categories = ?req.categories, "Creating event");
    let (values, categories) = req.into_parts();
    let record = state.services.events.save(None, values, categories).await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(record))))
}

/// PUT /events/{id} - Replace an event
///
/// Category links are only ever added.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 405, description = "Categories missing or unknown", body = ErrorResponse)
    )
)]
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<EventRequest>,
) -> AppResult<Json<EventResponse>> {
    info!(event_id = id, categories = ?req.categories, "Updating event");
    let (values, categories) = req.into_parts();
    let record = state
        .services
        .events
        .save(Some(id), values, categories)
        .await?;
    Ok(Json(EventResponse::from(record)))
}

/// GET /events - List all events
#[utoipa::path(
    get,
    path = "/",
    tag = EVENT_TAG,
    responses(
        (status = 200, description = "All events", body = Vec<EventResponse>),
        (status = 404, description = "No events exist", body = ErrorResponse)
    )
)]
async fn list_events(State(state): State<AppState>) -> AppResult<Json<Vec<EventResponse>>> {
    info!("Listing events");
    let records = state.services.events.list().await?;
    Ok(Json(records.into_iter().map(EventResponse::from).collect()))
}

/// GET /events/categories - List events by category id or name
#[utoipa::path(
    get,
    path = "/categories",
    tag = EVENT_TAG,
    params(EventCategoryQuery),
    responses(
        (status = 200, description = "Matching events", body = Vec<EventResponse>),
        (status = 400, description = "Unknown or conflicting parameters", body = ErrorResponse),
        (status = 404, description = "No matching events", body = ErrorResponse)
    )
)]
async fn list_events_by_category(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
    ValidatedQuery(query): ValidatedQuery<EventCategoryQuery>,
) -> AppResult<Json<Vec<EventResponse>>> {
    reject_unknown_params(&raw, EVENT_CATEGORY_QUERY_KEYS).inspect_err(|_| {
        warn!(params = ?raw.keys().collect::<Vec<_>>(), "Rejected event category query")
    })?;

    let records = match query.into_filter()? {
        EventCategoryFilter::All => {
            info!("Listing events without category filter");
            state.services.events.list().await?
        }
        EventCategoryFilter::CategoryId(id) => {
            info!(category_id = id, "Listing events by category id");
            state.services.events.list_by_category_id(id).await?
        }
        EventCategoryFilter::CategoryName(name) => {
            info!(category_name = %name, "Listing events by category name");
            state.services.events.list_by_category_name(&name).await?
        }
    };
    Ok(Json(records.into_iter().map(EventResponse::from).collect()))
}

/// GET /events/{id} - Get an event with its categories and event details
#[utoipa::path(
    get,
    path = "/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EventResponse>> {
    info!(event_id = id, "Fetching event");
    let record = state.services.events.get(id).await?;
    Ok(Json(EventResponse::from(record)))
}

/// DELETE /events/{id} - Delete an event with its event details
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = EVENT_TAG,
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    )
)]
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    info!(event_id = id, "Deleting event");
    let message = state.services.events.delete(id).await?;
    Ok(Json(MessageResponse::new(message)))
}

/// GET /events/{id}/event-details - List event details of an event
#[utoipa::path(
    get,
    path = "/{id}/event-details",
    tag = EVENT_TAG,
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event details of the event", body = Vec<EventDetailViewResponse>),
        (status = 404, description = "No event details for the event", body = ErrorResponse)
    )
)]
async fn list_event_details_of_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<EventDetailViewResponse>>> {
    info!(event_id = id, "Listing event details by event");
    let views = state
        .services
        .event_details
        .list(EventDetailFilter::EventId(id))
        .await?;
    Ok(Json(
        views.into_iter().map(EventDetailViewResponse::from).collect(),
    ))
}

/// POST /events/{event_id}/venues/{venue_id}/event-details - Schedule an event at a venue
#[utoipa::path(
    post,
    path = "/{event_id}/venues/{venue_id}/event-details",
    tag = EVENT_TAG,
    params(
        ("event_id" = i64, Path, description = "Event ID"),
        ("venue_id" = i64, Path, description = "Venue ID")
    ),
    request_body = EventDetailRequest,
    responses(
        (status = 201, description = "Event detail saved", body = EventDetailResponse),
        (status = 404, description = "Event, venue or event detail not found", body = ErrorResponse),
        (status = 409, description = "Event detail belongs to another event or venue", body = ErrorResponse)
    )
)]
async fn create_event_detail_for_event(
    State(state): State<AppState>,
    Path((event_id, venue_id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<EventDetailRequest>,
) -> AppResult<(StatusCode, Json<EventDetailResponse>)> {
    info!(event_id, venue_id, event_detail_id = ?req.event_detail_id, "Saving event detail");
    let (id, input) = req.into_parts();
    let detail = state
        .services
        .event_details
        .save(event_id, venue_id, id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(EventDetailResponse::from(detail))))
}
