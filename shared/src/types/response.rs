//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Success envelope: `{"success": true, ...data}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    /// Always `true`; failures use `ErrorResponse`
    pub success: bool,

    /// Payload fields, flattened next to `success`
    #[serde(flatten)]
    pub data: T,
}

/// Payload of responses carrying nothing but the success flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

impl SuccessResponse<Empty> {
    /// Bare `{"success": true}`
    pub fn ok() -> Self {
        Self::with(Empty {})
    }
}

impl<T> SuccessResponse<T> {
    /// Wrap a payload
    pub fn with(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Individual dependency checks
    pub services: HashMap<String, HealthStatus>,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

impl HealthResponse {
    /// Build a response; the overall status is the worst of the checks
    pub fn from_checks(services: HashMap<String, HealthStatus>, version: impl Into<String>) -> Self {
        let status = services
            .values()
            .copied()
            .max_by_key(|s| s.severity())
            .unwrap_or(HealthStatus::Healthy);
        Self {
            status,
            services,
            timestamp: Utc::now(),
            version: version.into(),
        }
    }
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn severity(&self) -> u8 {
        match self {
            HealthStatus::Healthy => 0,
            HealthStatus::Degraded => 1,
            HealthStatus::Unhealthy => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Token {
        #[serde(rename = "resetToken")]
        reset_token: String,
    }

    #[test]
    fn test_success_response_flattens_payload() {
        let body = serde_json::to_value(SuccessResponse::with(Token {
            reset_token: "abc".to_string(),
        }))
        .unwrap();
        assert_eq!(body, json!({"success": true, "resetToken": "abc"}));
    }

    #[test]
    fn test_bare_success_response() {
        let body = serde_json::to_value(SuccessResponse::ok()).unwrap();
        assert_eq!(body, json!({"success": true}));
    }

    #[test]
    fn test_health_takes_worst_status() {
        let mut checks = HashMap::new();
        checks.insert("database".to_string(), HealthStatus::Unhealthy);
        checks.insert("sms".to_string(), HealthStatus::Healthy);
        let health = HealthResponse::from_checks(checks, "0.1.0");
        assert_eq!(health.status, HealthStatus::Unhealthy);

        let empty = HealthResponse::from_checks(HashMap::new(), "0.1.0");
        assert_eq!(empty.status, HealthStatus::Healthy);
    }
}
