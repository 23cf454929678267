use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::Upload;

#[derive(Clone, Debug)]
pub struct ReceiptScan {
    pub images: Vec<Upload>,
    pub vehicle_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(flatten)]
    pub extraction: Map<String, Value>,
    pub image_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<String>,
}

impl Receipt {
    pub fn new(
        mut extraction: Map<String, Value>,
        image_urls: Vec<String>,
        vehicle_id: Option<String>,
    ) -> Self {
        super::strip_reserved(&mut extraction, &["imageUrls", "vehicleId"]);

        Self {
            extraction,
            image_urls,
            vehicle_id,
        }
    }
}
