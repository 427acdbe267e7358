//! Upload directory setup

use anyhow::{Context, Result};
use ecoscan_core::Config;
use ecoscan_storage::SlotRegistry;

/// Create the upload folders under the configured root and a slot manager for each.
pub async fn setup_storage(config: &Config) -> Result<SlotRegistry> {
    tracing::info!(
        upload_root = %config.upload_root().display(),
        "Bootstrapping upload directories..."
    );

    let registry = SlotRegistry::bootstrap(config.upload_root(), config.allowed_extensions())
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directories under {}",
                config.upload_root().display()
            )
        })?;

    tracing::info!("Upload directories initialized successfully");
    Ok(registry)
}
