//! EcoScan Storage Library
//!
//! Filesystem side of the upload service: every upload directory holds at most
//! one `front-` and one `back-` image.
//!
//! - [`inspector`] reports the current front/back occupancy of a directory.
//! - [`allocator`] decides which slot a new image takes, evicts the previous
//!   occupant and writes the new file.
//! - [`bootstrap`] creates the upload directories at start-up.
//! - [`registry`] holds one [`UploadSlotManager`] per upload folder.
//!
//! # Filename format
//!
//! `<slot>-<unix millis>-<random>.<ext>`, e.g. `front-1718000000000-482913551.jpg`.

pub mod allocator;
pub mod bootstrap;
pub mod error;
pub mod inspector;
pub(crate) mod naming;
pub mod registry;

// Re-export commonly used types
pub use allocator::{select_slot, StoredImage, UploadSlotManager};
pub use bootstrap::ensure_upload_directories;
pub use error::{SlotError, SlotResult};
pub use inspector::{inspect_directory, list_slot_files, SlotFile};
pub use registry::SlotRegistry;
