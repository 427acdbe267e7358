//! Slot storage errors

use std::io;
use std::path::Path;

use ecoscan_core::AppError;
use thiserror::Error;

/// Slot storage operation errors
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Destination already exists: {0}")]
    WriteConflict(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for slot storage operations
pub type SlotResult<T> = Result<T, SlotError>;

impl SlotError {
    /// Classify an I/O error raised while touching `path`.
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SlotError::DirectoryNotFound(path.display().to_string()),
            io::ErrorKind::PermissionDenied => {
                SlotError::PermissionDenied(path.display().to_string())
            }
            _ => SlotError::Io(err),
        }
    }
}

impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::DirectoryNotFound(msg) => AppError::DirectoryNotFound(msg),
            SlotError::PermissionDenied(msg) => AppError::PermissionDenied(msg),
            SlotError::WriteConflict(msg) => AppError::WriteConflict(msg),
            SlotError::Io(err) => AppError::UnexpectedIo(err.to_string()),
        }
    }
}
