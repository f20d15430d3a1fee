//! Error response DTOs.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = "Category with ID=7 was not found.")]
    pub message: String,
    #[schema(example = "Not Found")]
    pub status_reason: String,
    #[schema(example = 404)]
    pub status_code: u16,
    /// RFC 1123 time the error was produced
    #[schema(example = "Mon, 19 Oct 2026 10:00:00 GMT")]
    pub timestamp: String,
    #[schema(example = "/categories/7")]
    pub uri: String,
}

impl ErrorResponse {
    /// Creates an error body stamped with the current time and no uri.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            status_code: status.as_u16(),
            timestamp: chrono::Utc::now()
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string(),
            uri: String::new(),
        }
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_fields() {
        let body = ErrorResponse::new(StatusCode::METHOD_NOT_ALLOWED, "blocked").with_uri("/venues/1");
        assert_eq!(body.status_code, 405);
        assert_eq!(body.status_reason, "Method Not Allowed");
        assert_eq!(body.uri, "/venues/1");
        assert!(body.timestamp.ends_with(" GMT"));
    }

    #[test]
    fn test_error_response_serializes_camel_case() {
        let body = ErrorResponse::new(StatusCode::NOT_FOUND, "missing");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["statusReason"], "Not Found");
        assert_eq!(json["statusCode"], 404);
        assert!(json.get("status_code").is_none());
    }
}
