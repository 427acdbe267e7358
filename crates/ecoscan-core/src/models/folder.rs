use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload directories exposed by the service, one per product slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadFolder {
    Uploads,
    Product1,
    Product2,
}

impl UploadFolder {
    pub const ALL: [UploadFolder; 3] = [
        UploadFolder::Uploads,
        UploadFolder::Product1,
        UploadFolder::Product2,
    ];

    /// Directory name under the upload root, also used as the static URL segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadFolder::Uploads => "uploads",
            UploadFolder::Product1 => "product1",
            UploadFolder::Product2 => "product2",
        }
    }
}

impl FromStr for UploadFolder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploads" => Ok(UploadFolder::Uploads),
            "product1" => Ok(UploadFolder::Product1),
            "product2" => Ok(UploadFolder::Product2),
            _ => Err(anyhow::anyhow!(
                "Invalid folder '{}'. Allowed folders: uploads, product1, product2",
                s
            )),
        }
    }
}

impl Display for UploadFolder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_round_trips_through_str() {
        for folder in UploadFolder::ALL {
            assert_eq!(folder.as_str().parse::<UploadFolder>().unwrap(), folder);
        }
    }

    #[test]
    fn test_unknown_folder_rejected() {
        let err = "product3".parse::<UploadFolder>().unwrap_err();
        assert!(err.to_string().contains("product3"));
        assert!("../uploads".parse::<UploadFolder>().is_err());
        assert!("Uploads".parse::<UploadFolder>().is_err());
    }
}
