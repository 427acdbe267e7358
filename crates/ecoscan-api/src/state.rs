//! Shared application state.

use ecoscan_core::{Config, ImageValidator};
use ecoscan_storage::SlotRegistry;

use crate::services::eco_score::EcoScoreClient;

/// State handed to every handler behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// One slot manager per upload folder
    pub slots: SlotRegistry,
    pub validator: ImageValidator,
    pub eco_score: EcoScoreClient,
}

impl AppState {
    pub fn new(config: Config, slots: SlotRegistry, eco_score: EcoScoreClient) -> Self {
        let validator = ImageValidator::new(
            config.max_file_size_bytes(),
            config.allowed_extensions().to_vec(),
            config.allowed_content_types().to_vec(),
        );

        Self {
            config,
            slots,
            validator,
            eco_score,
        }
    }
}
