mod category;
mod event;
mod event_detail;
mod venue;

pub use category::{Category, NewCategory};
pub use event::{Event, EventCategory, NewEvent};
pub use event_detail::{EventDetail, EventDetailFilter, EventDetailView, NewEventDetail};
pub use venue::{NewVenue, Venue};
