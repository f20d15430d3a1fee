//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure leaves the API as an `ErrorResponse`. `AppError` responses
//! carry their body in the response extensions; `error_envelope_middleware`
//! stamps the request uri onto it and rewrites framework errors (unknown
//! route, wrong method, bad path parameter) into the same shape.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Upper bound on a framework error body read back by the envelope.
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

/// Maps an AppError variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } | AppError::EmptyResult { .. } => StatusCode::NOT_FOUND,
        AppError::Unsupported { .. } => StatusCode::METHOD_NOT_ALLOWED,
        AppError::Conflict { .. } | AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Message exposed to clients; server-side sources stay in the logs.
fn public_message(error: &AppError) -> String {
    match error {
        AppError::ConnectionPool { .. } => "Database connection unavailable".to_string(),
        AppError::Internal { .. } => "An internal error occurred".to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if status.is_server_error() {
            tracing::error!(error = %self, source = ?std::error::Error::source(&self), "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = ErrorResponse::new(status, public_message(&self));
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

/// Middleware that gives every error response the standard envelope.
///
/// Must sit inside the compression layer so framework bodies are read
/// uncompressed.
pub async fn error_envelope_middleware(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let uri = request.uri().path().to_string();
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let existing = parts.extensions.remove::<ErrorResponse>();

    // A JSON body without an envelope is a handler's own report, e.g. /health
    if existing.is_none() && is_json(&parts.headers) {
        return Response::from_parts(parts, body);
    }

    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);

    let envelope = match existing {
        Some(existing) => existing,
        None => {
            let bytes = axum::body::to_bytes(body, MAX_ERROR_BODY_BYTES)
                .await
                .unwrap_or_default();
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            let message = if text.is_empty() {
                default_message(status)
            } else {
                text
            };
            ErrorResponse::new(status, message)
        }
    };

    (parts, Json(envelope.with_uri(uri))).into_response()
}

fn is_json(headers: &header::HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn default_message(status: StatusCode) -> String {
    match status {
        StatusCode::NOT_FOUND => "The requested resource was not found".to_string(),
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint".to_string(),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported media type".to_string(),
        StatusCode::PAYLOAD_TOO_LARGE => "Request payload too large".to_string(),
        StatusCode::REQUEST_TIMEOUT => "Request took too long to complete".to_string(),
        other => other
            .canonical_reason()
            .unwrap_or("An unknown error occurred")
            .to_string(),
    }
}
