use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the two image positions a product directory can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Front,
    Back,
}

impl ImageSlot {
    /// Filename prefix carried by every file stored in this slot.
    pub fn prefix(&self) -> &'static str {
        match self {
            ImageSlot::Front => "front-",
            ImageSlot::Back => "back-",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSlot::Front => "front",
            ImageSlot::Back => "back",
        }
    }

    /// Slot a filename belongs to, judged by prefix only.
    pub fn from_filename(name: &str) -> Option<Self> {
        if name.starts_with(ImageSlot::Front.prefix()) {
            Some(ImageSlot::Front)
        } else if name.starts_with(ImageSlot::Back.prefix()) {
            Some(ImageSlot::Back)
        } else {
            None
        }
    }
}

impl FromStr for ImageSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" => Ok(ImageSlot::Front),
            "back" => Ok(ImageSlot::Back),
            _ => Err(anyhow::anyhow!("Invalid image slot: {}", s)),
        }
    }
}

impl Display for ImageSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only view of an upload directory's front/back occupancy.
///
/// Names keep filesystem enumeration order; callers that care about age must
/// look at modification times themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySnapshot {
    /// Number of files with an allowed image extension, prefixed or not
    pub total_files: usize,
    pub front_images: Vec<String>,
    pub back_images: Vec<String>,
}

impl DirectorySnapshot {
    pub fn front_occupied(&self) -> bool {
        !self.front_images.is_empty()
    }

    pub fn back_occupied(&self) -> bool {
        !self.back_images.is_empty()
    }

    pub fn images(&self, slot: ImageSlot) -> &[String] {
        match slot {
            ImageSlot::Front => &self.front_images,
            ImageSlot::Back => &self.back_images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_prefixes() {
        assert_eq!(ImageSlot::Front.prefix(), "front-");
        assert_eq!(ImageSlot::Back.prefix(), "back-");
    }

    #[test]
    fn test_slot_from_filename() {
        assert_eq!(
            ImageSlot::from_filename("front-1700000000000-42.jpg"),
            Some(ImageSlot::Front)
        );
        assert_eq!(
            ImageSlot::from_filename("back-1700000000000-42.png"),
            Some(ImageSlot::Back)
        );
        assert_eq!(ImageSlot::from_filename("frontier.jpg"), None);
        assert_eq!(ImageSlot::from_filename("side-1.jpg"), None);
    }

    #[test]
    fn test_slot_serializes_lowercase() {
        let json = serde_json::to_string(&ImageSlot::Front).unwrap();
        assert_eq!(json, "\"front\"");
        assert_eq!("BACK".parse::<ImageSlot>().unwrap(), ImageSlot::Back);
    }

    #[test]
    fn test_snapshot_occupancy() {
        let snapshot = DirectorySnapshot {
            total_files: 1,
            front_images: vec!["front-1-2.jpg".to_string()],
            back_images: vec![],
        };
        assert!(snapshot.front_occupied());
        assert!(!snapshot.back_occupied());
        assert_eq!(snapshot.images(ImageSlot::Front).len(), 1);
    }
}
