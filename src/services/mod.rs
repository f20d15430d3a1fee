//! Service layer for business logic operations.
//!
//! Services own the transaction boundaries and enforce the rules that span
//! more than one table.

mod category_service;
mod event_detail_service;
mod event_service;
mod venue_service;

pub use category_service::CategoryService;
pub use event_detail_service::{AvailabilityReport, EventDetailInput, EventDetailService};
pub use event_service::{EventRecord, EventService};
pub use venue_service::{VenueRecord, VenueService};

use crate::db::AsyncDbPool;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the pool uses `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub categories: CategoryService,
    pub venues: VenueService,
    pub events: EventService,
    pub event_details: EventDetailService,
}

impl Services {
    /// Builds every service on clones of `pool`.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            categories: CategoryService::new(pool.clone()),
            venues: VenueService::new(pool.clone()),
            events: EventService::new(pool.clone()),
            event_details: EventDetailService::new(pool),
        }
    }
}
