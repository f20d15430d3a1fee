use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;

/// Event detail row as stored in `event_details`.
///
/// Owns exactly one event and one venue through `event_id` and `venue_id`.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::event_details)]
#[diesel(primary_key(event_detail_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventDetail {
    pub event_detail_id: i64,
    pub event_id: i64,
    pub venue_id: i64,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_free: Option<bool>,
    pub availability: bool,
}

/// Column values written on insert and on full update.
#[derive(Debug, Insertable, AsChangeset, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::event_details)]
#[diesel(treat_none_as_null = true)]
pub struct NewEventDetail {
    pub event_id: i64,
    pub venue_id: i64,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_free: Option<bool>,
    pub availability: bool,
}

/// An event detail joined with the names of its owning event and venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetailView {
    pub detail: EventDetail,
    pub event_name: String,
    pub venue_name: String,
}

impl From<(EventDetail, String, String)> for EventDetailView {
    fn from((detail, event_name, venue_name): (EventDetail, String, String)) -> Self {
        Self {
            detail,
            event_name,
            venue_name,
        }
    }
}

/// The single filter applied when listing event details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDetailFilter {
    All,
    EventId(i64),
    EventName(String),
    VenueId(i64),
    VenueName(String),
    Date(NaiveDate),
}

impl EventDetailFilter {
    /// Message reported when the filter matches no rows.
    pub fn empty_message(&self) -> String {
        match self {
            Self::All => "No event details found.".to_string(),
            Self::EventId(id) => format!("No event details found by event ID={}", id),
            Self::EventName(name) => format!("No event details found by event name={}", name),
            Self::VenueId(id) => format!("No event details found by venue ID={}", id),
            Self::VenueName(name) => format!("No event details found by venue name={}", name),
            Self::Date(date) => format!("No event details found on {}", date),
        }
    }
}
