//! Data models for the upload service
//!
//! Slots and folders describe where an image lives; the upload module holds the
//! JSON bodies returned by the HTTP layer.

mod folder;
mod slot;
mod upload;

// Re-export all models for convenient imports
pub use folder::*;
pub use slot::*;
pub use upload::*;
