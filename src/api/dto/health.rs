//! Health report bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /health`; the service is only as healthy as its database.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    #[schema(example = "up")]
    pub status: HealthStatus,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// RFC 3339 time of the check
    #[schema(example = "2026-10-19T10:00:00Z")]
    pub checked_at: String,
    pub database: DatabaseCheck,
}

impl HealthReport {
    pub fn new(database: DatabaseCheck) -> Self {
        Self {
            status: database.status,
            version: crate::pkg_version().to_string(),
            checked_at: chrono::Utc::now().to_rfc3339(),
            database,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Outcome of a `SELECT 1` round trip through the pool.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCheck {
    pub status: HealthStatus,
    #[schema(example = 3)]
    pub latency_ms: u64,
    /// Pool or query error when `status` is `down`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_takes_database_status() {
        let report = HealthReport::new(DatabaseCheck {
            status: HealthStatus::Down,
            latency_ms: 5000,
            error: Some("pool timed out".to_string()),
        });
        assert_eq!(report.status, HealthStatus::Down);
        assert_eq!(report.version, crate::pkg_version());
    }

    #[test]
    fn test_report_wire_shape() {
        let report = HealthReport::new(DatabaseCheck {
            status: HealthStatus::Up,
            latency_ms: 2,
            error: None,
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "up");
        assert_eq!(json["database"]["latencyMs"], 2);
        assert!(json["database"].get("error").is_none());
        assert!(json["checkedAt"].is_string());
    }
}
