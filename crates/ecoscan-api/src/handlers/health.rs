//! Health check handler and response type.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use ecoscan_core::UploadFolder;
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheckResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Per-folder result: "healthy", "timeout" or the inspection error
    pub folders: BTreeMap<String, String>,
}

/// Liveness plus readability of every upload folder
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "All upload folders readable", body = HealthCheckResponse),
        (status = 503, description = "At least one upload folder cannot be inspected", body = HealthCheckResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut folders = BTreeMap::new();
    let mut healthy = true;

    for folder in UploadFolder::ALL {
        let manager = state.slots.manager(folder);
        let result = match tokio::time::timeout(CHECK_TIMEOUT, manager.snapshot()).await {
            Ok(Ok(_)) => "healthy".to_string(),
            Ok(Err(e)) => {
                tracing::error!(error = %e, folder = %folder, "Upload folder health check failed");
                healthy = false;
                format!("unhealthy: {}", e)
            }
            Err(_) => {
                tracing::error!(folder = %folder, "Upload folder health check timed out");
                healthy = false;
                "timeout".to_string()
            }
        };
        folders.insert(folder.to_string(), result);
    }

    let (status_code, status) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status_code,
        Json(HealthCheckResponse {
            status: status.to_string(),
            folders,
        }),
    )
}
