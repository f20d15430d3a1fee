//! Event detail repository for async database operations.

use chrono::NaiveDate;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::error::{AppError, AppResult};
use crate::models::{EventDetail, EventDetailFilter, EventDetailView, NewEventDetail};
use crate::schema::{event_details, events, venues};

/// Queries on `event_details`, run on a connection the caller owns.
pub struct EventDetailRepository;

impl EventDetailRepository {
    /// Inserts a new event detail and returns it with its generated id.
    pub async fn insert(
        conn: &mut AsyncPgConnection,
        values: &NewEventDetail,
    ) -> AppResult<EventDetail> {
        diesel::insert_into(event_details::table)
            .values(values)
            .returning(EventDetail::as_returning())
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites every column of an existing event detail, `None` if it is absent.
    pub async fn update(
        conn: &mut AsyncPgConnection,
        id: i64,
        values: &NewEventDetail,
    ) -> AppResult<Option<EventDetail>> {
        diesel::update(event_details::table.find(id))
            .set(values)
            .returning(EventDetail::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds an event detail by id.
    ///
    /// # Returns
    /// `Some(EventDetail)` if found, `None` otherwise
    pub async fn find_by_id(
        conn: &mut AsyncPgConnection,
        id: i64,
    ) -> AppResult<Option<EventDetail>> {
        event_details::table
            .find(id)
            .select(EventDetail::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists event details joined with their event and venue names.
    ///
    /// Name filters match exactly; rows come back ordered by id.
    pub async fn list(
        conn: &mut AsyncPgConnection,
        filter: &EventDetailFilter,
    ) -> AppResult<Vec<EventDetailView>> {
        let query = event_details::table
            .inner_join(events::table)
            .inner_join(venues::table)
            .select((
                EventDetail::as_select(),
                events::event_name,
                venues::venue_name,
            ))
            .order(event_details::event_detail_id.asc())
            .into_boxed::<Pg>();

        let query = match filter {
            EventDetailFilter::All => query,
            EventDetailFilter::EventId(id) => query.filter(event_details::event_id.eq(*id)),
            EventDetailFilter::EventName(name) => {
                query.filter(events::event_name.eq(name.clone()))
            }
            EventDetailFilter::VenueId(id) => query.filter(event_details::venue_id.eq(*id)),
            EventDetailFilter::VenueName(name) => {
                query.filter(venues::venue_name.eq(name.clone()))
            }
            EventDetailFilter::Date(date) => query.filter(event_details::date.eq(*date)),
        };

        let rows: Vec<(EventDetail, String, String)> =
            query.load(conn).await.map_err(AppError::from)?;
        Ok(rows.into_iter().map(EventDetailView::from).collect())
    }

    /// Marks one event detail unavailable, `None` if it is absent.
    pub async fn set_unavailable(
        conn: &mut AsyncPgConnection,
        id: i64,
    ) -> AppResult<Option<EventDetail>> {
        diesel::update(event_details::table.find(id))
            .set(event_details::availability.eq(false))
            .returning(EventDetail::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Marks every still-available event detail on `date` unavailable.
    ///
    /// # Returns
    /// The number of rows that changed state
    pub async fn set_unavailable_on(conn: &mut AsyncPgConnection, date: NaiveDate) -> AppResult<usize> {
        diesel::update(
            event_details::table
                .filter(event_details::date.eq(date))
                .filter(event_details::availability.eq(true)),
        )
        .set(event_details::availability.eq(false))
        .execute(conn)
        .await
        .map_err(AppError::from)
    }

    /// Deletes an event detail by id, returning the number of rows removed.
    pub async fn delete(conn: &mut AsyncPgConnection, id: i64) -> AppResult<usize> {
        diesel::delete(event_details::table.find(id))
            .execute(conn)
            .await
            .map_err(AppError::from)
    }
}
