//! Root and operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campaign_management::CampaignStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub const ROOT_MESSAGE: &str = "AI Branding Tool Minimal Backend is running!";

/// Shared state for operational handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CampaignStore>,
    pub start_time: Instant,
}

/// GET /: Backend banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// GET /health: Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        campaigns: state.store.len(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /live: Liveness probe.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub campaigns: usize,
    pub uptime_secs: u64,
}
