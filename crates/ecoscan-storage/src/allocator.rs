//! Slot allocator: decides where a new image goes and makes room for it.

use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

use ecoscan_core::{DirectorySnapshot, ImageSlot};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{SlotError, SlotResult};
use crate::inspector::{inspect_directory, list_slot_files};
use crate::naming::generate_filename;

/// Pick the slot for an incoming image from the age of the current occupants.
///
/// An empty front slot is filled first, then the back slot. With both occupied
/// the older file is replaced; equal timestamps replace the back image.
pub fn select_slot(front: Option<SystemTime>, back: Option<SystemTime>) -> ImageSlot {
    match (front, back) {
        (None, _) => ImageSlot::Front,
        (Some(_), None) => ImageSlot::Back,
        (Some(front), Some(back)) => {
            if front < back {
                ImageSlot::Front
            } else {
                ImageSlot::Back
            }
        }
    }
}

/// Outcome of a successful store
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub slot: ImageSlot,
    pub filename: String,
    pub path: PathBuf,
    /// Files removed from the slot to make room
    pub evicted: Vec<String>,
    pub size_bytes: usize,
    /// Image files in the directory after the write
    pub total_images: usize,
}

/// Owns one upload directory and serializes every mutation of it.
pub struct UploadSlotManager {
    dir: PathBuf,
    allowed_extensions: Vec<String>,
    write_lock: Mutex<()>,
}

impl UploadSlotManager {
    /// Create a manager for `dir`. The directory must already exist (see `bootstrap`).
    pub fn new(dir: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Current front/back occupancy.
    pub async fn snapshot(&self) -> SlotResult<DirectorySnapshot> {
        inspect_directory(&self.dir, &self.allowed_extensions).await
    }

    /// Slot the next upload would be assigned to.
    pub async fn next_slot(&self) -> SlotResult<ImageSlot> {
        let front = list_slot_files(&self.dir, ImageSlot::Front, &self.allowed_extensions).await?;
        let back = list_slot_files(&self.dir, ImageSlot::Back, &self.allowed_extensions).await?;

        Ok(select_slot(
            front.first().map(|f| f.modified),
            back.first().map(|f| f.modified),
        ))
    }

    /// Delete every file carrying `slot`'s prefix, oldest first.
    ///
    /// Individual delete failures are logged and skipped. Returns the names removed.
    pub async fn cleanup(&self, slot: ImageSlot) -> SlotResult<Vec<String>> {
        let files = list_slot_files(&self.dir, slot, &self.allowed_extensions).await?;

        let mut evicted = Vec::with_capacity(files.len());
        for file in files {
            match fs::remove_file(&file.path).await {
                Ok(()) => {
                    tracing::info!(
                        dir = %self.dir.display(),
                        slot = %slot,
                        filename = %file.name,
                        "Evicted slot occupant"
                    );
                    evicted.push(file.name);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(filename = %file.name, "Slot occupant already removed");
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        dir = %self.dir.display(),
                        filename = %file.name,
                        "Failed to evict slot occupant"
                    );
                }
            }
        }

        Ok(evicted)
    }

    /// Store `data` as the directory's new front or back image.
    ///
    /// Inspect, decide, evict and write run under the directory lock so the
    /// directory never ends up with two occupants of one slot.
    pub async fn store(&self, extension: &str, data: &[u8]) -> SlotResult<StoredImage> {
        let _guard = self.write_lock.lock().await;
        let start = Instant::now();

        let slot = self.next_slot().await?;
        // Runs even when the slot is empty to sweep files left by an interrupted upload
        let evicted = self.cleanup(slot).await?;

        let filename = generate_filename(slot, extension);
        let path = self.dir.join(&filename);
        write_image(&path, data).await?;

        let total_images = self.snapshot().await?.total_files;

        tracing::info!(
            dir = %self.dir.display(),
            slot = %slot,
            filename = %filename,
            evicted = ?evicted,
            size_bytes = data.len(),
            total_images,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Stored image in slot"
        );

        Ok(StoredImage {
            slot,
            filename,
            path,
            evicted,
            size_bytes: data.len(),
            total_images,
        })
    }
}

/// Write `data` to a path that must not exist yet.
pub(crate) async fn write_image(path: &Path, data: &[u8]) -> SlotResult<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => {
                SlotError::WriteConflict(path.display().to_string())
            }
            _ => SlotError::from_io(path, e),
        })?;

    let written = async {
        file.write_all(data).await?;
        file.sync_all().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        if let Err(cleanup_err) = fs::remove_file(path).await {
            tracing::warn!(
                error = %cleanup_err,
                path = %path.display(),
                "Failed to remove partially written image"
            );
        }
        return Err(SlotError::Io(e));
    }

    Ok(())
}
