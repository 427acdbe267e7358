//! Common utilities for the image upload handlers

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use ecoscan_core::{AppError, UploadFolder};

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";

/// The `image` field of an upload form, read into memory
#[derive(Debug)]
pub struct UploadedFile {
    /// At most `max_size + 1` bytes; anything longer was cut off while reading
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge(err.body_text())
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

/// Extract the single `image` field from a multipart form.
///
/// Other fields are ignored. The file is read chunk by chunk and reading stops
/// once it passes `max_size`, so an oversized upload is never buffered in full.
pub async fn extract_image_field(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<UploadedFile, AppError> {
    let mut file: Option<UploadedFile> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        if file.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple image fields are not allowed; send exactly one field named 'image'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let mut data = Vec::new();
        let mut truncated = false;
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            data.extend_from_slice(&chunk);
            if data.len() > max_size {
                data.truncate(max_size + 1);
                truncated = true;
                break;
            }
        }

        file = Some(UploadedFile {
            data,
            filename,
            content_type,
        });

        if truncated {
            break;
        }
    }

    file.ok_or_else(|| AppError::InvalidInput("No file uploaded".to_string()))
}

/// Parse the `{folder}` path segment; unknown folders are a client error.
pub fn parse_folder(raw: &str) -> Result<UploadFolder, AppError> {
    raw.parse::<UploadFolder>()
        .map_err(|e| AppError::InvalidInput(e.to_string()))
}

/// Public URL of a stored image, e.g. `http://localhost:5000/product1/front-1-2.jpg`.
pub fn build_file_url(public_base_url: &str, folder: UploadFolder, filename: &str) -> String {
    format!(
        "{}/{}/{}",
        public_base_url.trim_end_matches('/'),
        folder.as_str(),
        filename
    )
}
