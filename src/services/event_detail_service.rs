//! Event detail service for business logic operations.
//!
//! An event detail belongs to one event and one venue, both checked inside
//! the same transaction that writes the detail. Availability only ever moves
//! from available to unavailable.

use chrono::{NaiveDate, NaiveTime};
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{EventDetail, EventDetailFilter, EventDetailView, NewEventDetail};
use crate::repositories::EventDetailRepository;
use crate::services::category_service::{deleted_message, non_empty};
use crate::services::{EventService, VenueService};

/// Scalar fields of an event detail as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetailInput {
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_free: Option<bool>,
    pub availability: Option<bool>,
}

impl EventDetailInput {
    fn into_new(self, event_id: i64, venue_id: i64, availability: bool) -> NewEventDetail {
        NewEventDetail {
            event_id,
            venue_id,
            description: self.description,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            is_free: self.is_free,
            availability,
        }
    }
}

/// Outcome of a bulk availability change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityReport {
    pub message: String,
    pub count: usize,
}

#[derive(Clone)]
pub struct EventDetailService {
    pool: AsyncDbPool,
}

impl EventDetailService {
    /// Creates a new EventDetailService on the shared pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates an event detail under an event and a venue, or overwrites one.
    ///
    /// An existing detail must already belong to `event_id` and `venue_id`.
    /// On update the stored availability can be cleared but never restored.
    ///
    /// # Arguments
    /// * `event_id` - Owning event, which must exist
    /// * `venue_id` - Hosting venue, which must exist
    /// * `id` - Detail to overwrite, or `None` to create
    /// * `input` - Date, times and flags to store
    ///
    /// # Returns
    /// The stored event detail
    ///
    /// # Errors
    /// `NotFound` for a missing event, venue or detail, `Conflict` when the
    /// stored owners differ from the supplied ones
    pub async fn save(
        &self,
        event_id: i64,
        venue_id: i64,
        id: Option<i64>,
        input: EventDetailInput,
    ) -> AppResult<EventDetail> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    EventService::require(conn, event_id).await?;
                    VenueService::require(conn, venue_id).await?;

                    match id {
                        None => {
                            let availability = input.availability.unwrap_or(true);
                            let values = input.into_new(event_id, venue_id, availability);
                            EventDetailRepository::insert(conn, &values).await
                        }
                        Some(id) => {
                            let existing = EventDetailRepository::find_by_id(conn, id)
                                .await?
                                .ok_or_else(|| AppError::not_found_by_id("Event Detail", id))?;
                            check_owners(&existing, event_id, venue_id)?;

                            let availability =
                                existing.availability && input.availability.unwrap_or(true);
                            let values = input.into_new(event_id, venue_id, availability);
                            EventDetailRepository::update(conn, id, &values)
                                .await?
                                .ok_or_else(|| AppError::not_found_by_id("Event Detail", id))
                        }
                    }
                }
                .scope_boxed()
            })
            .await
    }

    /// Lists event details matching `filter`, joined with event and venue names.
    ///
    /// # Returns
    /// Matching details ordered by id, or `EmptyResult` with a message
    /// naming the filter
    pub async fn list(&self, filter: EventDetailFilter) -> AppResult<Vec<EventDetailView>> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;
        let details = EventDetailRepository::list(&mut conn, &filter).await?;
        non_empty(details, filter.empty_message())
    }

    /// Marks one event detail unavailable and returns it.
    pub async fn make_unavailable(&self, id: i64) -> AppResult<EventDetail> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    EventDetailRepository::set_unavailable(conn, id)
                        .await?
                        .ok_or_else(|| AppError::not_found_by_id("Event Detail", id))
                }
                .scope_boxed()
            })
            .await
    }

    /// Marks every available event detail on `date` unavailable.
    ///
    /// A date with nothing left to change is reported, not rejected.
    ///
    /// # Returns
    /// How many details changed and the message describing it
    pub async fn make_unavailable_on(&self, date: NaiveDate) -> AppResult<AvailabilityReport> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let count = conn
            .build_transaction()
            .serializable()
            .run(|conn| {
                async move { EventDetailRepository::set_unavailable_on(conn, date).await }
                    .scope_boxed()
            })
            .await?;

        Ok(availability_report(count, date))
    }

    /// Deletes one event detail.
    ///
    /// # Returns
    /// The confirmation message, or `NotFound` for an unknown id
    pub async fn delete(&self, id: i64) -> AppResult<String> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    if EventDetailRepository::find_by_id(conn, id).await?.is_none() {
                        return Err(AppError::not_found_by_id("Event Detail", id));
                    }
                    EventDetailRepository::delete(conn, id).await?;
                    Ok(deleted_message("event detail", id))
                }
                .scope_boxed()
            })
            .await
    }
}

/// Fails with `Conflict` naming whichever owner differs from the stored one.
pub(crate) fn check_owners(existing: &EventDetail, event_id: i64, venue_id: i64) -> AppResult<()> {
    let event_differs = existing.event_id != event_id;
    let venue_differs = existing.venue_id != venue_id;
    let id = existing.event_detail_id;

    let message = match (event_differs, venue_differs) {
        (false, false) => return Ok(()),
        (true, true) => format!(
            "EventDetail with ID={} is not associated with event ID={} and venue ID={}",
            id, event_id, venue_id
        ),
        (true, false) => format!(
            "EventDetail with ID={} is not associated with event ID={}",
            id, event_id
        ),
        (false, true) => format!(
            "EventDetail with ID={} is not associated with venue ID={}",
            id, venue_id
        ),
    };
    Err(AppError::conflict(message))
}

/// Message for a bulk change; zero is worded differently.
pub(crate) fn availability_report(count: usize, date: NaiveDate) -> AvailabilityReport {
    let message = if count == 0 {
        format!("No event details previously available on {}", date)
    } else {
        format!("{} event details became unavailable on {}", count, date)
    };
    AvailabilityReport { message, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(event_id: i64, venue_id: i64) -> EventDetail {
        EventDetail {
            event_detail_id: 9,
            event_id,
            venue_id,
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            start_time: None,
            end_time: None,
            is_free: Some(true),
            availability: true,
        }
    }

    #[test]
    fn test_check_owners_accepts_matching_owners() {
        assert!(check_owners(&detail(1, 2), 1, 2).is_ok());
    }

    #[test]
    fn test_check_owners_names_venue_mismatch() {
        let err = check_owners(&detail(1, 2), 1, 3).unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(
            err.to_string(),
            "EventDetail with ID=9 is not associated with venue ID=3"
        );
    }

    #[test]
    fn test_check_owners_names_event_mismatch() {
        let err = check_owners(&detail(1, 2), 5, 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "EventDetail with ID=9 is not associated with event ID=5"
        );
    }

    #[test]
    fn test_check_owners_names_both_mismatches() {
        let err = check_owners(&detail(1, 2), 1_000, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "EventDetail with ID=9 is not associated with event ID=1000 and venue ID=3"
        );
    }

    #[test]
    fn test_availability_report_counts() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let report = availability_report(3, date);
        assert_eq!(report.count, 3);
        assert_eq!(report.message, "3 event details became unavailable on 2026-10-19");

        let report = availability_report(0, date);
        assert_eq!(report.count, 0);
        assert_eq!(
            report.message,
            "No event details previously available on 2026-10-19"
        );
    }

    #[test]
    fn test_input_into_new_keeps_owners() {
        let input = EventDetailInput {
            description: Some("Evening show".to_string()),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            start_time: NaiveTime::from_hms_opt(19, 0, 0),
            end_time: NaiveTime::from_hms_opt(21, 30, 0),
            is_free: Some(false),
            availability: None,
        };
        let values = input.into_new(1, 2, true);
        assert_eq!(values.event_id, 1);
        assert_eq!(values.venue_id, 2);
        assert!(values.availability);
        assert_eq!(values.description.as_deref(), Some("Evening show"));
    }
}
