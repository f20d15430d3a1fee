use utoipa::OpenApi;

pub const CATEGORY_TAG: &str = "Category";
pub const VENUE_TAG: &str = "Venue";
pub const EVENT_TAG: &str = "Event";
pub const EVENT_DETAIL_TAG: &str = "Event Detail";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Management",
        description = "Categories, venues, events and their scheduled event details",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::error::ValidationFieldError,
        )
    ),
    tags(
        (name = CATEGORY_TAG, description = "Event category endpoints"),
        (name = VENUE_TAG, description = "Venue endpoints"),
        (name = EVENT_TAG, description = "Event endpoints"),
        (name = EVENT_DETAIL_TAG, description = "Scheduling and availability of events at venues"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
