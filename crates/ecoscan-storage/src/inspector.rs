//! Slot inspector: read-only view of an upload directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use ecoscan_core::{DirectorySnapshot, ImageSlot};
use tokio::fs;

use crate::error::{SlotError, SlotResult};

/// An image file currently occupying a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFile {
    pub name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Whether `name` ends in one of `allowed_extensions` (case-insensitive).
pub(crate) fn is_allowed_image(name: &str, allowed_extensions: &[String]) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
        _ => false,
    }
}

/// Names of the regular image files in `dir`, in enumeration order.
async fn image_file_names(dir: &Path, allowed_extensions: &[String]) -> SlotResult<Vec<String>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| SlotError::from_io(dir, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| SlotError::from_io(dir, e))?
    {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_allowed_image(&name, allowed_extensions) {
            continue;
        }
        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => names.push(name),
            Ok(_) => {}
            // Removed between listing and stat
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(SlotError::from_io(dir, e)),
        }
    }

    Ok(names)
}

/// Report the current front/back occupancy of `dir`.
///
/// Fails with `DirectoryNotFound` when `dir` does not exist and `PermissionDenied`
/// when it cannot be listed. Never modifies the directory.
pub async fn inspect_directory(
    dir: &Path,
    allowed_extensions: &[String],
) -> SlotResult<DirectorySnapshot> {
    let names = image_file_names(dir, allowed_extensions).await?;

    let mut snapshot = DirectorySnapshot {
        total_files: names.len(),
        ..Default::default()
    };
    for name in names {
        match ImageSlot::from_filename(&name) {
            Some(ImageSlot::Front) => snapshot.front_images.push(name),
            Some(ImageSlot::Back) => snapshot.back_images.push(name),
            None => {}
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        total_files = snapshot.total_files,
        front = snapshot.front_images.len(),
        back = snapshot.back_images.len(),
        "Inspected upload directory"
    );

    Ok(snapshot)
}

/// Files in `dir` carrying `slot`'s prefix, oldest modification time first.
pub async fn list_slot_files(
    dir: &Path,
    slot: ImageSlot,
    allowed_extensions: &[String],
) -> SlotResult<Vec<SlotFile>> {
    let names = image_file_names(dir, allowed_extensions).await?;

    let mut files = Vec::new();
    for name in names
        .into_iter()
        .filter(|name| name.starts_with(slot.prefix()))
    {
        let path = dir.join(&name);
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(SlotError::Io(e)),
        };
        let modified = metadata.modified()?;
        files.push(SlotFile {
            name,
            path,
            modified,
        });
    }

    files.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.name.cmp(&b.name)));
    Ok(files)
}
