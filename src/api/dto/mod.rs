//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by resource; every body is camelCase JSON.

mod category;
mod error;
mod event;
mod event_detail;
mod health;
mod message;
mod venue;

pub use category::{CategoryRequest, CategoryResponse};
pub use error::ErrorResponse;
pub use event::{
    EVENT_CATEGORY_QUERY_KEYS, EventCategoryFilter, EventCategoryQuery, EventRequest,
    EventResponse,
};
pub use event_detail::{
    AvailabilityQuery, AvailabilityResponse, EVENT_DETAIL_QUERY_KEYS, EventDetailOwnerQuery,
    EventDetailQuery, EventDetailRequest, EventDetailResponse, EventDetailViewResponse,
    reject_unknown_params,
};
pub use health::{DatabaseCheck, HealthReport, HealthStatus};
pub use message::MessageResponse;
pub use venue::{VenueRequest, VenueResponse};
