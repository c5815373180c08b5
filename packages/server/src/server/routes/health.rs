use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    /// Exhibition rows loaded at startup
    exhibitions: usize,
}

/// Health check endpoint
///
/// The dataset is loaded before the server binds, so a running server is
/// always healthy.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            exhibitions: state.deps.exhibitions.exhibition_count(),
        }),
    )
}
