//! Health check endpoint.
//!
//! Unauthenticated liveness probe used by deployment tooling and the
//! frontend's backend-availability banner.

use axum::extract::Json;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

/// Response for the health probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving requests.
    pub status: String,
    /// Service identifier for multi-service deployments.
    pub service: String,
}

/// GET /health - Liveness probe
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "chemostats-backend".to_string(),
    })
}

/// Creates the health router.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serializes() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            service: "chemostats-backend".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"status":"healthy","service":"chemostats-backend"}"#);
    }

    #[test]
    fn router_builds() {
        let _router: Router = health_routes();
    }
}
