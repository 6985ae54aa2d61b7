//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::StorageBackend, models::MessageResponse, AppState};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
    /// Store backing the catalog
    pub storage: StorageBackend,
}

/// Liveness check with a fixed body, whatever the method
#[utoipa::path(
    get,
    path = "/test.json",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = MessageResponse)
    )
)]
pub async fn liveness() -> Json<MessageResponse> {
    Json(MessageResponse::new("Good response!"))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.config.database.backend,
    })
}
