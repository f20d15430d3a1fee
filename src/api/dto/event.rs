//! Event DTOs for API requests and responses.

use crate::api::dto::EventDetailResponse;
use crate::error::{AppError, AppResult};
use crate::models::NewEvent;
use crate::services::EventRecord;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for creating or replacing an event.
///
/// `categories` names existing categories; duplicates collapse.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    #[validate(length(min = 1, max = 255, message = "Event name must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Jazz Night")]
    pub event_name: String,
    #[validate(length(max = 128))]
    #[schema(example = "Weekly")]
    pub frequency: Option<String>,
    #[validate(length(max = 128))]
    #[schema(example = "3 hours")]
    pub duration: Option<String>,
    pub event_note: Option<String>,
    #[serde(default)]
    #[schema(example = json!(["Music"]))]
    pub categories: Vec<String>,
}

impl EventRequest {
    /// Splits the request into column values and category names.
    pub fn into_parts(self) -> (NewEvent, Vec<String>) {
        (
            NewEvent {
                event_name: self.event_name,
                frequency: self.frequency,
                duration: self.duration,
                event_note: self.event_note,
            },
            self.categories,
        )
    }
}

/// Event as returned by the API.
///
/// `eventDetails` is populated for single-event reads and saves only.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event_id: i64,
    pub event_name: String,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub event_note: Option<String>,
    pub categories: Vec<String>,
    pub event_details: Vec<EventDetailResponse>,
}

impl From<EventRecord> for EventResponse {
    fn from(record: EventRecord) -> Self {
        let event = record.event;
        Self {
            event_id: event.event_id,
            event_name: event.event_name,
            frequency: event.frequency,
            duration: event.duration,
            event_note: event.event_note,
            categories: record.categories,
            event_details: record
                .event_details
                .into_iter()
                .map(|view| EventDetailResponse::from(view.detail))
                .collect(),
        }
    }
}

/// Query parameters for `GET /events/categories`.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct EventCategoryQuery {
    /// Id of a category linked to the events
    pub category_id: Option<i64>,
    /// Name of a category linked to the events
    pub category_name: Option<String>,
}

/// Query names accepted by `GET /events/categories`.
pub const EVENT_CATEGORY_QUERY_KEYS: &[&str] = &["category_id", "category_name"];

/// The category constraint selected by an [`EventCategoryQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventCategoryFilter {
    All,
    CategoryId(i64),
    CategoryName(String),
}

impl EventCategoryQuery {
    pub fn into_filter(self) -> AppResult<EventCategoryFilter> {
        match (self.category_id, self.category_name) {
            (Some(_), Some(_)) => Err(AppError::bad_request(too_many_parameters(2))),
            (Some(id), None) => Ok(EventCategoryFilter::CategoryId(id)),
            (None, Some(name)) => Ok(EventCategoryFilter::CategoryName(name)),
            (None, None) => Ok(EventCategoryFilter::All),
        }
    }
}

pub(crate) fn too_many_parameters(count: usize) -> String {
    format!(
        "Number of selected parameters are {}. Only one parameter allowed at a time.",
        count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_request_defaults_categories_to_empty() {
        let request: EventRequest = serde_json::from_str(r#"{"eventName":"Jazz Night"}"#).unwrap();
        let (values, categories) = request.into_parts();
        assert_eq!(values.event_name, "Jazz Night");
        assert!(categories.is_empty());
    }

    #[test]
    fn test_category_query_selects_single_filter() {
        let query = EventCategoryQuery {
            category_id: Some(3),
            category_name: None,
        };
        assert_eq!(query.into_filter().unwrap(), EventCategoryFilter::CategoryId(3));
        assert_eq!(
            EventCategoryQuery::default().into_filter().unwrap(),
            EventCategoryFilter::All
        );
    }

    #[test]
    fn test_category_query_rejects_both_filters() {
        let query = EventCategoryQuery {
            category_id: Some(3),
            category_name: Some("Music".to_string()),
        };
        let err = query.into_filter().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Number of selected parameters are 2. Only one parameter allowed at a time."
        );
    }
}
