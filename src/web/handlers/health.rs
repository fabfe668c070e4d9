//! Health check handler.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::web::dto::HealthResponse;
use crate::web::handlers::AppState;

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: state.site.service.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
