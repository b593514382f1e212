use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::collections::HashMap;

use crate::error::{api_success, ApiResponse};
use crate::routes::paths;
use crate::server::HospitalServer;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
    pub version: String,
    /// Seconds since the server state was built
    pub uptime: u64,
    /// Store backend, `postgres` or `memory`
    pub backend: String,
    pub referential_policy: String,
    /// Individual service health checks
    pub checks: HashMap<String, String>,
}

/// Listing routes served by this instance
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub name: String,
    pub version: String,
    pub resources: Vec<ResourceLink>,
}

#[derive(Debug, Serialize)]
pub struct ResourceLink {
    pub entity: &'static str,
    pub listing: &'static str,
}

/// Store health probe; answers 503 when the store is unreachable
pub async fn health_check(
    State(server): State<HospitalServer>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let store_ok = server.store.is_healthy().await;

    let mut checks = HashMap::new();
    checks.insert(
        "database".to_string(),
        if store_ok { "healthy" } else { "unreachable" }.to_string(),
    );

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if store_ok { "healthy" } else { "degraded" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: server.uptime_seconds(),
        backend: server.store.backend().to_string(),
        referential_policy: server.store.policy().to_string(),
        checks,
    };

    (
        status,
        Json(ApiResponse {
            success: store_ok,
            data: response,
        }),
    )
}

pub async fn index(State(server): State<HospitalServer>) -> Json<ApiResponse<IndexResponse>> {
    Json(api_success(IndexResponse {
        name: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        resources: vec![
            ResourceLink {
                entity: "patient",
                listing: paths::patients::LIST,
            },
            ResourceLink {
                entity: "doctor",
                listing: paths::doctors::LIST,
            },
            ResourceLink {
                entity: "appointment",
                listing: paths::appointments::LIST,
            },
            ResourceLink {
                entity: "bill",
                listing: paths::billing::LIST,
            },
        ],
    }))
}
