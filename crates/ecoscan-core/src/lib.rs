//! EcoScan Core Library
//!
//! This crate provides the domain models, error types, configuration, and upload
//! validation shared by the storage and HTTP crates.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, UploadServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{DirectorySnapshot, ImageSlot, UploadFolder};
pub use validation::{ImageValidator, ValidationError};
