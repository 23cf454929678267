use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::Upload;

/// Everything the driver sends along with the damage photos.
#[derive(Clone, Debug)]
pub struct ClaimReport {
    pub images: Vec<Upload>,
    pub location: String,
    pub model: String,
    pub year: String,
    pub driver_report: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
}

/// The model's analysis, kept as the object it returned, plus what the
/// gateway adds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    #[serde(flatten)]
    pub analysis: Map<String, Value>,
    pub image_urls: Vec<String>,
    pub status: ClaimStatus,
}

impl Claim {
    pub fn new(mut analysis: Map<String, Value>, image_urls: Vec<String>) -> Self {
        super::strip_reserved(&mut analysis, &["imageUrls", "status"]);

        Self {
            analysis,
            image_urls,
            status: ClaimStatus::Pending,
        }
    }
}
