//! Venue DTOs for API requests and responses.

use crate::api::dto::EventDetailResponse;
use crate::models::NewVenue;
use crate::services::VenueRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or replacing a venue.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VenueRequest {
    #[validate(length(min = 1, max = 255, message = "Venue name must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Riverside Hall")]
    pub venue_name: String,
    #[validate(range(min = 0, message = "Capacity can not be negative"))]
    #[schema(minimum = 0, example = 300)]
    pub capacity: Option<i32>,
    #[validate(length(max = 255))]
    pub venue_address: Option<String>,
    #[validate(length(max = 128))]
    pub venue_city: Option<String>,
    #[validate(length(max = 32))]
    pub venue_zip: Option<String>,
    pub venue_note: Option<String>,
}

impl VenueRequest {
    pub fn into_new_venue(self) -> NewVenue {
        NewVenue {
            venue_name: self.venue_name,
            capacity: self.capacity,
            venue_address: self.venue_address,
            venue_city: self.venue_city,
            venue_zip: self.venue_zip,
            venue_note: self.venue_note,
        }
    }
}

/// Venue as returned by the API.
///
/// `eventDetails` is only populated in the response to a save.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    pub venue_id: i64,
    pub venue_name: String,
    pub capacity: Option<i32>,
    pub venue_address: Option<String>,
    pub venue_city: Option<String>,
    pub venue_zip: Option<String>,
    pub venue_note: Option<String>,
    pub event_details: Vec<EventDetailResponse>,
}

impl From<VenueRecord> for VenueResponse {
    fn from(record: VenueRecord) -> Self {
        let venue = record.venue;
        Self {
            venue_id: venue.venue_id,
            venue_name: venue.venue_name,
            capacity: venue.capacity,
            venue_address: venue.venue_address,
            venue_city: venue.venue_city,
            venue_zip: venue.venue_zip,
            venue_note: venue.venue_note,
            event_details: record
                .event_details
                .into_iter()
                .map(|view| EventDetailResponse::from(view.detail))
                .collect(),
        }
    }
}
