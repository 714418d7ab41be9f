//! Health endpoint

use actix_web::{web, HttpResponse};
use async_trait::async_trait;
use lp_shared::{HealthResponse, HealthStatus};
use std::collections::HashMap;
use std::sync::Arc;

/// A dependency that can report its health
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Name under `services` in the response
    fn name(&self) -> &str;

    async fn check(&self) -> HealthStatus;
}

/// Registered dependency checks
#[derive(Clone, Default)]
pub struct HealthChecks(pub Vec<Arc<dyn HealthCheck>>);

/// Handler for GET /health
///
/// Responds 503 when any dependency is unhealthy.
pub async fn health_check(checks: web::Data<HealthChecks>) -> HttpResponse {
    let mut services = HashMap::new();
    for check in &checks.0 {
        services.insert(check.name().to_string(), check.check().await);
    }

    let response = HealthResponse::from_checks(services, env!("CARGO_PKG_VERSION"));
    match response.status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(response),
        _ => HttpResponse::Ok().json(response),
    }
}
