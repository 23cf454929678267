mod claim;
mod coordinates;
mod maintenance;
mod receipt;
mod route;
mod upload;

pub use claim::{Claim, ClaimReport, ClaimStatus};
pub use coordinates::Coordinates;
pub use maintenance::{Maintenance, MaintenanceReport, MaintenanceStatus};
pub use receipt::{Receipt, ReceiptScan};
pub use route::{RouteRequest, RouteResult, RouteStatus, RouteSummary, Stop, DEFAULT_ROUTE_NAME};
pub use upload::Upload;

use serde_json::{Map, Value};

/// Keys the gateway owns on a stored record. Model output may not set them.
const RECORD_KEYS: [&str; 2] = ["id", "createdAt"];

fn strip_reserved(object: &mut Map<String, Value>, keys: &[&str]) {
    for key in RECORD_KEYS.iter().chain(keys) {
        object.remove(*key);
    }
}
