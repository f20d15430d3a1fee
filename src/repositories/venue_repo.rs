//! Venue repository for async database operations.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::error::{AppError, AppResult};
use crate::models::{NewVenue, Venue};
use crate::schema::{event_details, venues};

/// Queries on `venues`, run on a connection the caller owns.
pub struct VenueRepository;

impl VenueRepository {
    /// Inserts a new venue and returns it with its generated id.
    pub async fn insert(conn: &mut AsyncPgConnection, values: &NewVenue) -> AppResult<Venue> {
        diesel::insert_into(venues::table)
            .values(values)
            .returning(Venue::as_returning())
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    /// Overwrites every column of an existing venue, `None` if it is absent.
    pub async fn update(
        conn: &mut AsyncPgConnection,
        id: i64,
        values: &NewVenue,
    ) -> AppResult<Option<Venue>> {
        diesel::update(venues::table.find(id))
            .set(values)
            .returning(Venue::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a venue by id.
    ///
    /// # Returns
    /// `Some(Venue)` if found, `None` otherwise
    pub async fn find_by_id(conn: &mut AsyncPgConnection, id: i64) -> AppResult<Option<Venue>> {
        venues::table
            .find(id)
            .select(Venue::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists every venue ordered by id.
    pub async fn list_all(conn: &mut AsyncPgConnection) -> AppResult<Vec<Venue>> {
        venues::table
            .select(Venue::as_select())
            .order(venues::venue_id.asc())
            .load(conn)
            .await
            .map_err(AppError::from)
    }

    /// Counts the event details scheduled at a venue.
    pub async fn count_event_details(conn: &mut AsyncPgConnection, id: i64) -> AppResult<i64> {
        event_details::table
            .filter(event_details::venue_id.eq(id))
            .count()
            .get_result(conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a venue by id, returning the number of rows removed.
    pub async fn delete(conn: &mut AsyncPgConnection, id: i64) -> AppResult<usize> {
        diesel::delete(venues::table.find(id))
            .execute(conn)
            .await
            .map_err(AppError::from)
    }
}
