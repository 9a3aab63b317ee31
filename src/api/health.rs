//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;
use crate::domain::DomainError;

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Result of probing one dependency
#[derive(Debug, Serialize)]
pub struct ComponentCheck {
    pub name: &'static str,
    pub status: HealthStatus,
    pub message: String,
}

impl ComponentCheck {
    fn cache(probe: Result<usize, DomainError>) -> Self {
        match probe {
            Ok(entries) => Self {
                name: "cache",
                status: HealthStatus::Healthy,
                message: format!("{} entries", entries),
            },
            Err(e) => Self {
                name: "cache",
                status: HealthStatus::Unhealthy,
                message: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<ComponentCheck>,
}

impl HealthResponse {
    /// Catalog reads bypass a failing dependency, so one only degrades the service
    fn from_checks(checks: Vec<ComponentCheck>) -> Self {
        let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        Self { status, checks }
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::from_checks(Vec::new()))
}

/// Probes the cache backend; always 200 while the process can serve
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let cache = ComponentCheck::cache(state.cache.size().await);

    (StatusCode::OK, Json(HealthResponse::from_checks(vec![cache])))
}

pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
