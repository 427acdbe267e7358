use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use ecoscan_core::models::UploadResponse;
use ecoscan_core::{AppError, UploadFolder};

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::ImageUploadService;
use crate::state::AppState;
use crate::utils::upload::parse_folder;

async fn upload_into(
    state: Arc<AppState>,
    folder: UploadFolder,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    // Not a multipart request at all: treat as a missing file
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!(rejection = %rejection.body_text(), "Upload without multipart body");
        AppError::InvalidInput("No file uploaded".to_string())
    })?;

    let response = ImageUploadService::new(&state)
        .upload(folder, multipart)
        .await?;

    Ok(Json(response))
}

/// Upload an image into the generic `uploads` folder
///
/// The image takes the front slot, the back slot, or replaces the older of the two.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No file, invalid type or file too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(folder = "uploads", operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    upload_into(state, UploadFolder::Uploads, multipart).await
}

/// Upload an image for product 1
#[utoipa::path(
    post,
    path = "/upload-product1",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No file, invalid type or file too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(folder = "product1", operation = "upload_image"))]
pub async fn upload_product1(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    upload_into(state, UploadFolder::Product1, multipart).await
}

/// Upload an image for product 2
#[utoipa::path(
    post,
    path = "/upload-product2",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No file, invalid type or file too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(folder = "product2", operation = "upload_image"))]
pub async fn upload_product2(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    upload_into(state, UploadFolder::Product2, multipart).await
}

/// Upload an image into any of the upload folders
#[utoipa::path(
    post,
    path = "/upload/{folder}",
    tag = "uploads",
    params(
        ("folder" = String, Path, description = "One of: uploads, product1, product2")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Unknown folder, no file, invalid type or file too large", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_to_folder(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let folder = parse_folder(&folder)?;
    upload_into(state, folder, multipart).await
}
