use std::path::Path;
use std::sync::Arc;

use ecoscan_core::UploadFolder;

use crate::allocator::UploadSlotManager;
use crate::bootstrap::ensure_upload_directories;
use crate::error::SlotResult;

/// One slot manager per upload folder, all rooted under the same parent directory.
#[derive(Clone)]
pub struct SlotRegistry {
    uploads: Arc<UploadSlotManager>,
    product1: Arc<UploadSlotManager>,
    product2: Arc<UploadSlotManager>,
}

impl SlotRegistry {
    /// Create the folder directories under `root` and a manager for each.
    pub async fn bootstrap(root: &Path, allowed_extensions: &[String]) -> SlotResult<Self> {
        let dirs: Vec<_> = UploadFolder::ALL
            .iter()
            .map(|folder| root.join(folder.as_str()))
            .collect();
        ensure_upload_directories(&dirs).await?;

        let manager = |folder: UploadFolder| {
            Arc::new(UploadSlotManager::new(
                root.join(folder.as_str()),
                allowed_extensions.to_vec(),
            ))
        };

        Ok(Self {
            uploads: manager(UploadFolder::Uploads),
            product1: manager(UploadFolder::Product1),
            product2: manager(UploadFolder::Product2),
        })
    }

    pub fn manager(&self, folder: UploadFolder) -> &Arc<UploadSlotManager> {
        match folder {
            UploadFolder::Uploads => &self.uploads,
            UploadFolder::Product1 => &self.product1,
            UploadFolder::Product2 => &self.product2,
        }
    }

    pub fn directory(&self, folder: UploadFolder) -> &Path {
        self.manager(folder).dir()
    }
}
