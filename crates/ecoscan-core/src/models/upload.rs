use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ImageSlot, UploadFolder};

/// Response body for a successful image upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    /// Absolute URL the stored image can be fetched from
    pub file_url: String,
    pub folder: UploadFolder,
    pub image_type: ImageSlot,
    /// Image files in the folder after this upload
    pub total_images: usize,
}

/// URLs of the files currently occupying each slot
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SlotUrls {
    pub front: Vec<String>,
    pub back: Vec<String>,
}

/// Response body for `GET /folder-status/{folder}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderStatusResponse {
    pub folder: UploadFolder,
    pub total_images: usize,
    pub front_images: usize,
    pub back_images: usize,
    pub files: SlotUrls,
}
