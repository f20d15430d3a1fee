//! Event repository for async database operations.
//!
//! Category links live in `event_category`; this repository only ever adds
//! links; they disappear when the event is deleted.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::error::{AppError, AppResult};
use crate::models::{Event, EventCategory, NewEvent};
use crate::schema::{categories, event_category, events};

/// Queries on `events` and `event_category`, run on a connection the
/// caller owns.
pub struct EventRepository;

impl EventRepository {
    /// Inserts a new event and returns it with its generated id.
    pub async fn insert(conn: &mut AsyncPgConnection, values: &NewEvent) -> AppResult<Event> {
        diesel::insert_into(events::table)
            .values(values)
            .returning(Event::as_returning())
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites every column of an existing event, `None` if it is absent.
    pub async fn update(
        conn: &mut AsyncPgConnection,
        id: i64,
        values: &NewEvent,
    ) -> AppResult<Option<Event>> {
        diesel::update(events::table.find(id))
            .set(values)
            .returning(Event::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds an event by id.
    pub async fn find_by_id(conn: &mut AsyncPgConnection, id: i64) -> AppResult<Option<Event>> {
        events::table
            .find(id)
            .select(Event::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists every event ordered by id.
    pub async fn list_all(conn: &mut AsyncPgConnection) -> AppResult<Vec<Event>> {
        events::table
            .select(Event::as_select())
            .order(events::event_id.asc())
            .load(conn)
            .await
            .map_err(AppError::from)
    }

    /// Lists the events linked to the given category id.
    pub async fn list_by_category_id(
        conn: &mut AsyncPgConnection,
        category_id: i64,
    ) -> AppResult<Vec<Event>> {
        events::table
            .inner_join(event_category::table)
            .filter(event_category::category_id.eq(category_id))
            .select(Event::as_select())
            .order(events::event_id.asc())
            .load(conn)
            .await
            .map_err(AppError::from)
    }

    /// Links an event to categories; links that already exist are kept as is.
    pub async fn link_categories(
        conn: &mut AsyncPgConnection,
        event_id: i64,
        category_ids: &[i64],
    ) -> AppResult<usize> {
        let links: Vec<EventCategory> = category_ids
            .iter()
            .map(|&category_id| EventCategory {
                event_id,
                category_id,
            })
            .collect();

        diesel::insert_into(event_category::table)
            .values(&links)
            .on_conflict_do_nothing()
            .execute(conn)
            .await
            .map_err(AppError::from)
    }

    /// Loads `(event_id, category_name)` pairs for the given events.
    pub async fn category_names(
        conn: &mut AsyncPgConnection,
        event_ids: &[i64],
    ) -> AppResult<Vec<(i64, String)>> {
        event_category::table
            .inner_join(categories::table)
            .filter(event_category::event_id.eq_any(event_ids))
            .select((event_category::event_id, categories::category_name))
            .order((event_category::event_id.asc(), categories::category_name.asc()))
            .load(conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes an event; its details and category links cascade.
    pub async fn delete(conn: &mut AsyncPgConnection, id: i64) -> AppResult<usize> {
        diesel::delete(events::table.find(id))
            .execute(conn)
            .await
            .map_err(AppError::from)
    }
}
