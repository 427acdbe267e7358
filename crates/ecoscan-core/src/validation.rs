//! Upload validation gate
//!
//! Runs before any directory mutation: an upload must carry an allowed image
//! extension, an allowed declared MIME type, and fit under the size limit.

use std::path::Path;

use crate::error::AppError;

/// Validation errors for uploaded images
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: exceeds maximum of {max} bytes")]
    FileTooLarge { max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Missing file extension: {0}")]
    MissingExtension(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { max } => AppError::FileTooLarge(format!(
                "File size exceeds maximum allowed size of {} MB",
                max / 1024 / 1024
            )),
            ValidationError::InvalidExtension { extension, allowed } => {
                AppError::InvalidFileType(format!(
                    "Invalid file extension '{}'. Only image files are allowed: {}",
                    extension,
                    allowed.join(", ")
                ))
            }
            ValidationError::InvalidContentType {
                content_type,
                allowed,
            } => AppError::InvalidFileType(format!(
                "Invalid content type '{}'. Only image files are allowed: {}",
                content_type,
                allowed.join(", ")
            )),
            ValidationError::MissingExtension(filename) => AppError::InvalidFileType(format!(
                "Missing file extension (filename: {})",
                filename
            )),
        }
    }
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Image upload validator, built once from configuration and shared by all folders.
#[derive(Debug, Clone)]
pub struct ImageValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl ImageValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.to_lowercase())
                .collect(),
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension, returning it as spelled in the filename.
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        if !self
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
        {
            return Err(ValidationError::InvalidExtension {
                extension: extension.to_string(),
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(extension.to_string())
    }

    /// Validate the declared content type
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = normalize_mime_type(content_type);

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate all aspects of a file; returns the extension to store it under.
    pub fn validate_all(
        &self,
        filename: &str,
        content_type: &str,
        file_size: usize,
    ) -> Result<String, ValidationError> {
        let extension = self.validate_extension(filename)?;
        self.validate_content_type(content_type)?;
        self.validate_file_size(file_size)?;
        Ok(extension)
    }
}
