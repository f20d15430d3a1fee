//! Event service for business logic operations.
//!
//! An event carries the names of its categories. Saving an event only adds
//! category links; links missing from a later save are kept.

use std::collections::{BTreeSet, HashMap};

use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::AsyncPgConnection;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, Event, EventDetailFilter, EventDetailView, NewEvent};
use crate::repositories::{CategoryRepository, EventDetailRepository, EventRepository};
use crate::services::category_service::{deleted_message, non_empty};

/// An event with its category names and, for single-event reads, its details.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub event: Event,
    pub categories: Vec<String>,
    pub event_details: Vec<EventDetailView>,
}

#[derive(Clone)]
pub struct EventService {
    pool: AsyncDbPool,
}

impl EventService {
    /// Creates a new EventService on the shared pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Loads an event or fails with `NotFound`, on a caller-owned connection.
    pub async fn require(conn: &mut AsyncPgConnection, id: i64) -> AppResult<Event> {
        EventRepository::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::not_found_by_id("Event", id))
    }

    /// Creates or overwrites an event and links it to the named categories.
    ///
    /// # Arguments
    /// * `id` - Event to overwrite, or `None` to create
    /// * `values` - Scalar event fields
    /// * `category_names` - Names of existing categories; duplicates collapse
    ///
    /// # Returns
    /// The stored event with all of its category names and event details
    ///
    /// # Errors
    /// `Unsupported` when a name does not resolve or no names are given,
    /// `NotFound` when `id` names no event
    pub async fn save(
        &self,
        id: Option<i64>,
        values: NewEvent,
        category_names: Vec<String>,
    ) -> AppResult<EventRecord> {
        let requested: BTreeSet<String> = category_names.into_iter().collect();
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    let names: Vec<String> = requested.iter().cloned().collect();
                    let found = CategoryRepository::find_by_names(conn, &names).await?;
                    let category_ids = resolve_categories(&requested, &found)?;

                    let event = match id {
                        None => EventRepository::insert(conn, &values).await?,
                        Some(id) => EventRepository::update(conn, id, &values)
                            .await?
                            .ok_or_else(|| AppError::not_found_by_id("Event", id))?,
                    };
                    EventRepository::link_categories(conn, event.event_id, &category_ids).await?;

                    Self::load_record(conn, event).await
                }
                .scope_boxed()
            })
            .await
    }

    /// Loads one event with its categories and event details.
    pub async fn get(&self, id: i64) -> AppResult<EventRecord> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let event = Self::require(conn, id).await?;
                    Self::load_record(conn, event).await
                }
                .scope_boxed()
            })
            .await
    }

    /// Lists every event with category names and no details.
    pub async fn list(&self) -> AppResult<Vec<EventRecord>> {
        let records = self.list_all_records().await?;
        non_empty(records, "No events found.")
    }

    /// Lists the events linked to the category with `category_id`.
    ///
    /// # Returns
    /// Matching events with their category names, or `EmptyResult`
    pub async fn list_by_category_id(&self, category_id: i64) -> AppResult<Vec<EventRecord>> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        let records = conn
            .build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let events = EventRepository::list_by_category_id(conn, category_id).await?;
                    Self::attach_categories(conn, events).await
                }
                .scope_boxed()
            })
            .await?;

        non_empty(
            records,
            format!("No events associated with category ID={}", category_id),
        )
    }

    /// Lists the events whose category names include `category_name`.
    ///
    /// Filters the full listing in memory.
    pub async fn list_by_category_name(&self, category_name: &str) -> AppResult<Vec<EventRecord>> {
        let records = self.list_all_records().await?;
        let matching = filter_by_category_name(records, category_name);
        non_empty(
            matching,
            format!("No events associated with category name: {}", category_name),
        )
    }

    /// Deletes an event together with its event details and category links.
    ///
    /// # Returns
    /// The confirmation message, or `NotFound` for an unknown id
    pub async fn delete(&self, id: i64) -> AppResult<String> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .serializable()
            .run(|conn| {
                async move {
                    Self::require(conn, id).await?;
                    EventRepository::delete(conn, id).await?;
                    Ok(deleted_message("event", id))
                }
                .scope_boxed()
            })
            .await
    }

    async fn list_all_records(&self) -> AppResult<Vec<EventRecord>> {
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        conn.build_transaction()
            .read_only()
            .run(|conn| {
                async move {
                    let events = EventRepository::list_all(conn).await?;
                    Self::attach_categories(conn, events).await
                }
                .scope_boxed()
            })
            .await
    }

    async fn load_record(conn: &mut AsyncPgConnection, event: Event) -> AppResult<EventRecord> {
        let categories = EventRepository::category_names(conn, &[event.event_id])
            .await?
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        let event_details =
            EventDetailRepository::list(conn, &EventDetailFilter::EventId(event.event_id)).await?;

        Ok(EventRecord {
            event,
            categories,
            event_details,
        })
    }

    async fn attach_categories(
        conn: &mut AsyncPgConnection,
        events: Vec<Event>,
    ) -> AppResult<Vec<EventRecord>> {
        let ids: Vec<i64> = events.iter().map(|e| e.event_id).collect();
        let mut names_by_event: HashMap<i64, Vec<String>> = HashMap::new();
        for (event_id, name) in EventRepository::category_names(conn, &ids).await? {
            names_by_event.entry(event_id).or_default().push(name);
        }

        Ok(events
            .into_iter()
            .map(|event| EventRecord {
                categories: names_by_event.remove(&event.event_id).unwrap_or_default(),
                event,
                event_details: Vec::new(),
            })
            .collect())
    }
}

/// Checks that every requested name resolved and returns the category ids.
///
/// The count check runs first, so an empty request against an empty match
/// reaches the emptiness check.
pub(crate) fn resolve_categories(
    requested: &BTreeSet<String>,
    found: &[Category],
) -> AppResult<Vec<i64>> {
    if found.len() != requested.len() {
        return Err(AppError::unsupported(
            "One or more categories are not valid! Create them first.",
        ));
    }
    if requested.is_empty() {
        return Err(AppError::unsupported(
            "Category can not be empty. It should be a list of category names.",
        ));
    }
    Ok(found.iter().map(|c| c.category_id).collect())
}

pub(crate) fn filter_by_category_name(
    records: Vec<EventRecord>,
    category_name: &str,
) -> Vec<EventRecord> {
    records
        .into_iter()
        .filter(|r| r.categories.iter().any(|name| name == category_name))
        .collect()
}
