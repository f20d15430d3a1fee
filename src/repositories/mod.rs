//! Repository layer for data access operations.
//!
//! Repositories are stateless: every method borrows the connection it runs
//! on, so a service can compose calls from several repositories inside one
//! transaction.

mod category_repo;
mod event_detail_repo;
mod event_repo;
mod venue_repo;

pub use category_repo::CategoryRepository;
pub use event_detail_repo::EventDetailRepository;
pub use event_repo::EventRepository;
pub use venue_repo::VenueRepository;
