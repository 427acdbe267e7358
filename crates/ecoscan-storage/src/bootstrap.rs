//! Start-up creation of the upload directories.

use std::path::PathBuf;

use tokio::fs;

use crate::error::{SlotError, SlotResult};

/// Create every directory in `dirs` (and missing parents). Existing directories are left untouched.
pub async fn ensure_upload_directories(dirs: &[PathBuf]) -> SlotResult<()> {
    for dir in dirs {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| SlotError::from_io(dir, e))?;
        tracing::info!(dir = %dir.display(), "Upload directory ready");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_creates_missing_directories_with_parents() {
        let root = tempdir().unwrap();
        let dirs = vec![
            root.path().join("uploads"),
            root.path().join("nested/product1"),
        ];

        ensure_upload_directories(&dirs).await.unwrap();
        assert!(dirs.iter().all(|d| d.is_dir()));
    }

    #[tokio::test]
    async fn test_is_idempotent_and_keeps_contents() {
        let root = tempdir().unwrap();
        let dirs = vec![root.path().join("product2")];

        ensure_upload_directories(&dirs).await.unwrap();
        std::fs::write(dirs[0].join("front-1-1.jpg"), b"img").unwrap();
        ensure_upload_directories(&dirs).await.unwrap();

        assert!(dirs[0].join("front-1-1.jpg").exists());
    }

    #[tokio::test]
    async fn test_file_in_the_way_is_an_error() {
        let root = tempdir().unwrap();
        let blocked = root.path().join("uploads");
        std::fs::write(&blocked, b"not a directory").unwrap();

        assert!(ensure_upload_directories(&[blocked]).await.is_err());
    }
}
