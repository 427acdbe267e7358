use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use ecoscan_core::models::FolderStatusResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::ImageUploadService;
use crate::state::AppState;
use crate::utils::upload::parse_folder;

/// Report which slots of a folder are occupied, with the URL of each image
#[utoipa::path(
    get,
    path = "/folder-status/{folder}",
    tag = "uploads",
    params(
        ("folder" = String, Path, description = "One of: uploads, product1, product2")
    ),
    responses(
        (status = 200, description = "Folder occupancy", body = FolderStatusResponse),
        (status = 400, description = "Unknown folder", body = ErrorResponse),
        (status = 500, description = "Folder cannot be read", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn folder_status(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
) -> Result<Json<FolderStatusResponse>, HttpAppError> {
    let folder = parse_folder(&folder)?;
    let status = ImageUploadService::new(&state)
        .folder_status(folder)
        .await?;
    Ok(Json(status))
}
