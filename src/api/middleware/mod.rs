//! Middleware components for request processing.
//!
//! Request id tagging, request logging and the error envelope that gives
//! every failure the same JSON body.

mod error_handler;
mod logging;
mod request_id;

pub use error_handler::{error_envelope_middleware, error_to_status_code};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
