//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use ecoscan_core::models;

/// Returns the OpenAPI document for every route the service exposes.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EcoScan Upload API",
        version = "0.1.0",
        description = "Product image uploads with front/back slot allocation per folder, folder status, static image serving and an eco-score proxy."
    ),
    paths(
        // Uploads
        handlers::image_upload::upload_image,
        handlers::image_upload::upload_product1,
        handlers::image_upload::upload_product2,
        handlers::image_upload::upload_to_folder,
        handlers::folder_status::folder_status,
        // Eco-score
        handlers::eco_score::get_eco_score,
        // Health
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::UploadResponse,
            models::FolderStatusResponse,
            models::SlotUrls,
            models::ImageSlot,
            models::UploadFolder,
            handlers::health::HealthCheckResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Front/back image slots per product folder"),
        (name = "eco-score", description = "Proxy to the external scoring service"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
