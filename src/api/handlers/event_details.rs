//! Event detail request handlers.

use std::collections::HashMap;

use crate::api::doc::EVENT_DETAIL_TAG;
use crate::api::dto::{
    AvailabilityQuery, AvailabilityResponse, EVENT_DETAIL_QUERY_KEYS, ErrorResponse,
    EventDetailOwnerQuery, EventDetailQuery, EventDetailRequest, EventDetailResponse,
    EventDetailViewResponse, MessageResponse, reject_unknown_params,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates event detail routes.
pub fn event_detail_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            list_event_details,
            create_event_detail,
            make_unavailable_on_date
        ))
        .routes(routes!(make_unavailable, delete_event_detail))
}

/// POST /event-details - Create or overwrite an event detail
///
/// Both owners are named in the query string.
#[utoipa::path(
    post,
    path = "/",
    tag = EVENT_DETAIL_TAG,
    params(EventDetailOwnerQuery),
    request_body = EventDetailRequest,
    responses(
        (status = 201, description = "Event detail saved", body = EventDetailResponse),
        (status = 400, description = "event_id or venue_id missing", body = ErrorResponse),
        (status = 404, description = "Event, venue or event detail not found", body = ErrorResponse),
        (status = 409, description = "Event detail belongs to another event or venue", body = ErrorResponse)
    )
)]
async fn create_event_detail(
    State(state): State<AppState>,
    ValidatedQuery(owners): ValidatedQuery<EventDetailOwnerQuery>,
    ValidatedJson(req): ValidatedJson<EventDetailRequest>,
) -> AppResult<(StatusCode, Json<EventDetailResponse>)> {
    let (event_id, venue_id) = owners
        .require()
        .inspect_err(|_| warn!("Event detail submitted without both owners"))?;
    info!(event_id, venue_id, event_detail_id = ?req.event_detail_id, "Saving event detail");

    let (id, input) = req.into_parts();
    let detail = state
        .services
        .event_details
        .save(event_id, venue_id, id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(EventDetailResponse::from(detail))))
}

/// GET /event-details - List event details, optionally filtered by one parameter
#[utoipa::path(
    get,
    path = "/",
    tag = EVENT_DETAIL_TAG,
    params(EventDetailQuery),
    responses(
        (status = 200, description = "Matching event details", body = Vec<EventDetailViewResponse>),
        (status = 400, description = "Unknown or conflicting parameters", body = ErrorResponse),
        (status = 404, description = "No matching event details", body = ErrorResponse)
    )
)]
async fn list_event_details(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
    ValidatedQuery(query): ValidatedQuery<EventDetailQuery>,
) -> AppResult<Json<Vec<EventDetailViewResponse>>> {
    reject_unknown_params(&raw, EVENT_DETAIL_QUERY_KEYS).inspect_err(|_| {
        warn!(params = ?raw.keys().collect::<Vec<_>>(), "Rejected event detail query")
    })?;

    let filter = query.into_filter()?;
    info!(?filter, "Listing event details");
    let views = state.services.event_details.list(filter).await?;
    Ok(Json(
        views.into_iter().map(EventDetailViewResponse::from).collect(),
    ))
}

/// PUT /event-details - Mark every event detail on a date unavailable
#[utoipa::path(
    put,
    path = "/",
    tag = EVENT_DETAIL_TAG,
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability changed, or a hint when no date was given", body = AvailabilityResponse),
        (status = 400, description = "Malformed date", body = ErrorResponse)
    )
)]
async fn make_unavailable_on_date(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AvailabilityQuery>,
) -> AppResult<Response> {
    let Some(date) = query.date else {
        warn!("Bulk availability change without a date");
        return Ok(Json(MessageResponse::new(
            "Only 'date' is accepted as a query string name.",
        ))
        .into_response());
    };

    info!(%date, "Marking event details unavailable");
    let report = state.services.event_details.make_unavailable_on(date).await?;
    Ok(Json(AvailabilityResponse::from(report)).into_response())
}

/// PUT /event-details/{id} - Mark one event detail unavailable
#[utoipa::path(
    put,
    path = "/{id}",
    tag = EVENT_DETAIL_TAG,
    params(
        ("id" = i64, Path, description = "Event detail ID")
    ),
    responses(
        (status = 200, description = "Event detail is now unavailable", body = EventDetailResponse),
        (status = 404, description = "Event detail not found", body = ErrorResponse)
    )
)]
async fn make_unavailable(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EventDetailResponse>> {
    info!(event_detail_id = id, "Marking event detail unavailable");
    let detail = state.services.event_details.make_unavailable(id).await?;
    Ok(Json(EventDetailResponse::from(detail)))
}

/// DELETE /event-details/{id} - Delete an event detail
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = EVENT_DETAIL_TAG,
    params(
        ("id" = i64, Path, description = "Event detail ID")
    ),
    responses(
        (status = 200, description = "Event detail deleted", body = MessageResponse),
        (status = 404, description = "Event detail not found", body = ErrorResponse)
    )
)]
async fn delete_event_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    info!(event_detail_id = id, "Deleting event detail");
    let message = state.services.event_details.delete(id).await?;
    Ok(Json(MessageResponse::new(message)))
}
