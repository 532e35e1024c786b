use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::presentation::state::AppState;

const SERVICE_NAME: &str = "Nexus AI Backend";

pub const API_ENDPOINTS: [&str; 11] = [
    "/api/chat",
    "/api/new-session",
    "/api/clear-session",
    "/api/history",
    "/api/files/upload",
    "/api/files/test",
    "/api/files/session/{session_id}",
    "/api/formats",
    "/api/formats/reload",
    "/api/health",
    "/api/status",
];

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub api_status: String,
    pub endpoints: Vec<String>,
    pub active_sessions: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Reports healthy while the process serves requests; the database state is
/// informational.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.repository.ping().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "unavailable".to_string()
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        database,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        api_status: "running".to_string(),
        endpoints: API_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        active_sessions: state.assistant.session_count(),
        timestamp: Utc::now(),
    })
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("{} is running!", SERVICE_NAME),
        timestamp: Utc::now(),
    })
}
