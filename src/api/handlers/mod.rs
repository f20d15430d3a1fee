//! HTTP request handlers for API endpoints.
//!
//! Handlers are organized by resource; each module exposes an
//! `OpenApiRouter` that `routes::create_router` nests under its prefix.

pub mod categories;
pub mod event_details;
pub mod events;
pub mod health;
pub mod venues;
