//! Event detail DTOs for API requests and responses.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::dto::event::too_many_parameters;
use crate::error::{AppError, AppResult};
use crate::models::{EventDetail, EventDetailFilter, EventDetailView};
use crate::services::{AvailabilityReport, EventDetailInput};

/// Request body for creating or replacing an event detail.
///
/// With `eventDetailId` set the stored detail is overwritten; it must
/// already belong to the event and venue named by the request.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailRequest {
    pub event_detail_id: Option<i64>,
    pub description: Option<String>,
    #[schema(value_type = String, format = Date, example = "2026-10-19")]
    pub date: NaiveDate,
    #[schema(value_type = Option<String>, example = "19:00:00")]
    pub start_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>, example = "21:30:00")]
    pub end_time: Option<NaiveTime>,
    pub is_free: Option<bool>,
    /// Defaults to true on create; an update can only clear it
    pub availability: Option<bool>,
}

impl EventDetailRequest {
    /// Splits the request into the optional target id and the scalar input.
    pub fn into_parts(self) -> (Option<i64>, EventDetailInput) {
        (
            self.event_detail_id,
            EventDetailInput {
                description: self.description,
                date: self.date,
                start_time: self.start_time,
                end_time: self.end_time,
                is_free: self.is_free,
                availability: self.availability,
            },
        )
    }
}

/// Event detail with the ids of its owning event and venue.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    pub event_detail_id: i64,
    pub event_id: i64,
    pub venue_id: i64,
    pub description: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[schema(value_type = Option<String>)]
    pub start_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>)]
    pub end_time: Option<NaiveTime>,
    pub is_free: Option<bool>,
    pub availability: bool,
}

impl From<EventDetail> for EventDetailResponse {
    fn from(detail: EventDetail) -> Self {
        Self {
            event_detail_id: detail.event_detail_id,
            event_id: detail.event_id,
            venue_id: detail.venue_id,
            description: detail.description,
            date: detail.date,
            start_time: detail.start_time,
            end_time: detail.end_time,
            is_free: detail.is_free,
            availability: detail.availability,
        }
    }
}

/// Event detail flattened with the names of its event and venue.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailViewResponse {
    pub event_detail_id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub venue_id: i64,
    pub venue_name: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[schema(value_type = Option<String>)]
    pub start_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>)]
    pub end_time: Option<NaiveTime>,
    pub is_free: Option<bool>,
    pub availability: bool,
}

impl From<EventDetailView> for EventDetailViewResponse {
    fn from(view: EventDetailView) -> Self {
        let detail = view.detail;
        Self {
            event_detail_id: detail.event_detail_id,
            event_id: detail.event_id,
            event_name: view.event_name,
            venue_id: detail.venue_id,
            venue_name: view.venue_name,
            description: detail.description,
            date: detail.date,
            start_time: detail.start_time,
            end_time: detail.end_time,
            is_free: detail.is_free,
            availability: detail.availability,
        }
    }
}

/// Query parameters for `GET /event-details`; at most one may be given.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct EventDetailQuery {
    pub event_id: Option<i64>,
    pub event_name: Option<String>,
    pub venue_id: Option<i64>,
    pub venue_name: Option<String>,
    /// Date in `YYYY-MM-DD` form
    #[param(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
}

/// Query names accepted by `GET /event-details`.
pub const EVENT_DETAIL_QUERY_KEYS: &[&str] =
    &["date", "event_id", "event_name", "venue_id", "venue_name"];

impl EventDetailQuery {
    /// Resolves the single selected filter.
    ///
    /// # Errors
    /// `BadRequest` when more than one parameter is present
    pub fn into_filter(self) -> AppResult<EventDetailFilter> {
        let selected = [
            self.event_id.is_some(),
            self.event_name.is_some(),
            self.venue_id.is_some(),
            self.venue_name.is_some(),
            self.date.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count();

        if selected > 1 {
            return Err(AppError::bad_request(too_many_parameters(selected)));
        }

        let filter = if let Some(id) = self.event_id {
            EventDetailFilter::EventId(id)
        } else if let Some(name) = self.event_name {
            EventDetailFilter::EventName(name)
        } else if let Some(id) = self.venue_id {
            EventDetailFilter::VenueId(id)
        } else if let Some(name) = self.venue_name {
            EventDetailFilter::VenueName(name)
        } else if let Some(date) = self.date {
            EventDetailFilter::Date(date)
        } else {
            EventDetailFilter::All
        };
        Ok(filter)
    }
}

/// Query parameters for `POST /event-details`; both are required.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct EventDetailOwnerQuery {
    pub event_id: Option<i64>,
    pub venue_id: Option<i64>,
}

impl EventDetailOwnerQuery {
    /// Returns `(event_id, venue_id)` or `BadRequest` when either is missing.
    pub fn require(self) -> AppResult<(i64, i64)> {
        match (self.event_id, self.venue_id) {
            (Some(event_id), Some(venue_id)) => Ok((event_id, venue_id)),
            _ => Err(AppError::bad_request(
                "Valid Query Parameter Required!!! Event Id or/and Venue Id can not be null or/and should be valid parameter name, which are event_id & venue_id.",
            )),
        }
    }
}

/// Query parameters for `PUT /event-details`.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    #[param(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
}

/// Result of a bulk availability change.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    #[schema(example = "3 event details became unavailable on 2026-10-19")]
    pub message: String,
    pub count: usize,
}

impl From<AvailabilityReport> for AvailabilityResponse {
    fn from(report: AvailabilityReport) -> Self {
        Self {
            message: report.message,
            count: report.count,
        }
    }
}

/// Rejects query names outside `allowed`.
///
/// Typed query structs ignore unknown names, so this runs on the raw map.
pub fn reject_unknown_params(params: &HashMap<String, String>, allowed: &[&str]) -> AppResult<()> {
    if params.keys().all(|key| allowed.contains(&key.as_str())) {
        return Ok(());
    }
    let names = match allowed.split_last() {
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        None => String::new(),
    };
    Err(AppError::bad_request(format!(
        "Invalid query parameter!!! Only allowed {}.",
        names
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_parameters_selects_all() {
        assert_eq!(
            EventDetailQuery::default().into_filter().unwrap(),
            EventDetailFilter::All
        );
    }

    #[test]
    fn test_single_parameter_selects_filter() {
        let query = EventDetailQuery {
            venue_name: Some("Riverside Hall".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.into_filter().unwrap(),
            EventDetailFilter::VenueName("Riverside Hall".to_string())
        );
    }

    #[test]
    fn test_two_parameters_are_rejected_even_if_both_match() {
        let query = EventDetailQuery {
            event_id: Some(1),
            event_name: Some("Jazz Night".to_string()),
            ..Default::default()
        };
        match query.into_filter() {
            Err(AppError::BadRequest { message }) => assert_eq!(
                message,
                "Number of selected parameters are 2. Only one parameter allowed at a time."
            ),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_owner_query_requires_both_ids() {
        let query = EventDetailOwnerQuery {
            event_id: Some(1),
            venue_id: None,
        };
        assert!(matches!(query.require(), Err(AppError::BadRequest { .. })));

        let query = EventDetailOwnerQuery {
            event_id: Some(1),
            venue_id: Some(2),
        };
        assert_eq!(query.require().unwrap(), (1, 2));
    }

    #[test]
    fn test_reject_unknown_params() {
        let mut params = HashMap::new();
        params.insert("event_id".to_string(), "1".to_string());
        assert!(reject_unknown_params(&params, EVENT_DETAIL_QUERY_KEYS).is_ok());

        params.insert("colour".to_string(), "red".to_string());
        let err = reject_unknown_params(&params, EVENT_DETAIL_QUERY_KEYS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid query parameter!!! Only allowed date, event_id, event_name, venue_id or venue_name."
        );
    }

    #[test]
    fn test_request_parses_camel_case_times() {
        let request: EventDetailRequest = serde_json::from_str(
            r#"{"date":"2026-10-19","startTime":"19:00:00","isFree":true}"#,
        )
        .unwrap();
        let (id, input) = request.into_parts();
        assert_eq!(id, None);
        assert_eq!(input.start_time, NaiveTime::from_hms_opt(19, 0, 0));
        assert_eq!(input.is_free, Some(true));
        assert_eq!(input.availability, None);
    }
}
