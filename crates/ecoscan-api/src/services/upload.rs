//! Image upload service
//!
//! Workflow: extract → validate → allocate slot (evict + write) → build response.
//! Validation finishes before the folder is touched, so a rejected upload never
//! changes what is on disk.

use std::sync::Arc;

use axum::extract::Multipart;
use ecoscan_core::models::{FolderStatusResponse, SlotUrls, UploadResponse};
use ecoscan_core::{AppError, UploadFolder};

use crate::state::AppState;
use crate::utils::upload::{build_file_url, extract_image_field};

/// An upload that passed the validation gate
#[derive(Debug)]
pub struct ValidatedImage {
    pub data: Vec<u8>,
    pub original_filename: String,
    /// Extension as spelled by the client, reused for the stored filename
    pub extension: String,
}

pub struct ImageUploadService {
    state: Arc<AppState>,
}

impl ImageUploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Store the uploaded image as `folder`'s new front or back image.
    pub async fn upload(
        &self,
        folder: UploadFolder,
        multipart: Multipart,
    ) -> Result<UploadResponse, AppError> {
        let validated = self.extract_and_validate(multipart).await?;

        let stored = self
            .state
            .slots
            .manager(folder)
            .store(&validated.extension, &validated.data)
            .await?;

        tracing::info!(
            folder = %folder,
            slot = %stored.slot,
            filename = %stored.filename,
            original_filename = %validated.original_filename,
            evicted = stored.evicted.len(),
            total_images = stored.total_images,
            "Image upload completed"
        );

        Ok(UploadResponse {
            message: format!("Image uploaded successfully as {} image", stored.slot),
            file_url: build_file_url(
                self.state.config.public_base_url(),
                folder,
                &stored.filename,
            ),
            folder,
            image_type: stored.slot,
            total_images: stored.total_images,
        })
    }

    /// Read the `image` field and run it through the validation gate.
    pub async fn extract_and_validate(
        &self,
        multipart: Multipart,
    ) -> Result<ValidatedImage, AppError> {
        let validator = &self.state.validator;
        let file = extract_image_field(multipart, validator.max_file_size()).await?;

        let extension = validator.validate_all(&file.filename, &file.content_type, file.data.len())?;

        Ok(ValidatedImage {
            data: file.data,
            original_filename: file.filename,
            extension,
        })
    }

    /// Current occupancy of `folder` with the public URL of every slot file.
    pub async fn folder_status(&self, folder: UploadFolder) -> Result<FolderStatusResponse, AppError> {
        let snapshot = self.state.slots.manager(folder).snapshot().await?;
        let base_url = self.state.config.public_base_url();
        let urls = |names: &[String]| -> Vec<String> {
            names
                .iter()
                .map(|name| build_file_url(base_url, folder, name))
                .collect()
        };

        Ok(FolderStatusResponse {
            folder,
            total_images: snapshot.total_files,
            front_images: snapshot.front_images.len(),
            back_images: snapshot.back_images.len(),
            files: SlotUrls {
                front: urls(&snapshot.front_images),
                back: urls(&snapshot.back_images),
            },
        })
    }
}
