//! Venue service for business logic operations.

use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::AsyncPgConnection;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{EventDetailFilter, EventDetailView, NewVenue, Venue};
use crate::repositories::{EventDetailRepository, VenueRepository};
use crate::services::category_service::{deleted_message, non_empty};

/// A venue together with the event details scheduled there.
///
/// Only `save` fills `event_details`; lookups leave it empty.
#[derive(Debug, Clone)]
pub struct VenueRecord {
    pub venue: Venue,
    pub event_details: Vec<EventDetailView>,
}

impl From<Venue> for VenueRecord {
    fn from(venue: Venue) -> Self {
        Self {
            venue,
            event_details: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct VenueService {
    pool: AsyncDbPool,
}

impl VenueService {
    /// Creates a new VenueService on the shared pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Loads a venue or fails with `NotFound`, on a caller-owned connection.
    pub async fn require(conn: &mut AsyncPgConnection, id: i64) -> AppResult<Venue> {
        VenueRepository::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::not_found_by_id("Venue", id))
    }

    /// Creates a venue when `id` is `None`, otherwise overwrites the stored one.
    ///
    /// # Arguments
    /// * `id` - Venue to overwrite, or `None` to create
    /// * `values` - Name, address and capacity to store
    ///
    /// # Returns
    /// The stored venue with every event detail already scheduled there
    ///
    /// # Errors
    /// `NotFound` when `id` names no venue
    pub async fn save(&self, id: Option<i64>, values: NewVenue) -> AppResult<VenueRecord> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    let venue = match id {
                        None => VenueRepository::insert(conn, &values).await?,
                        Some(id) => VenueRepository::update(conn, id, &values)
                            .await?
                            .ok_or_else(|| AppError::not_found_by_id("Venue", id))?,
                    };
                    let event_details = EventDetailRepository::list(
                        conn,
                        &EventDetailFilter::VenueId(venue.venue_id),
                    )
                    .await?;
                    Ok(VenueRecord {
                        venue,
                        event_details,
                    })
                }
                .scope_boxed()
            })
            .await
    }

    /// Gets a venue by its ID, without its event details.
    pub async fn get(&self, id: i64) -> AppResult<VenueRecord> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;
        Self::require(&mut conn, id).await.map(VenueRecord::from)
    }

    /// Lists every venue ordered by id.
    ///
    /// # Returns
    /// All venues, or `EmptyResult` when there are none
    pub async fn list(&self) -> AppResult<Vec<VenueRecord>> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;
        let venues = VenueRepository::list_all(&mut conn).await?;
        non_empty(venues, "No venues found.")
            .map(|venues| venues.into_iter().map(VenueRecord::from).collect())
    }

    /// Deletes a venue that hosts no event details.
    ///
    /// # Errors
    /// `NotFound` for an unknown id, `Unsupported` while details reference it
    pub async fn delete(&self, id: i64) -> AppResult<String> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    Self::require(conn, id).await?;
                    if VenueRepository::count_event_details(conn, id).await? > 0 {
                        return Err(AppError::unsupported(format!(
                            "Venue with ID={} is already associated with one or more event details and can not be deleted.",
                            id
                        )));
                    }
                    VenueRepository::delete(conn, id).await?;
                    Ok(deleted_message("venue", id))
                }
                .scope_boxed()
            })
            .await
    }
}
