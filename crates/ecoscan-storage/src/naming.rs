//! Destination filename generation.

use ecoscan_core::ImageSlot;
use rand::Rng;

/// Upper bound (exclusive) of the random filename component.
const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;

/// Build `<prefix><millis>-<random>.<extension>` for a new occupant of `slot`.
pub fn generate_filename(slot: ImageSlot, extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..RANDOM_SUFFIX_BOUND);
    format!(
        "{}{}-{}.{}",
        slot.prefix(),
        millis,
        random,
        extension.trim_start_matches('.')
    )
}
