use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub vehicle_id: String,
    pub driver_report: String,
    pub current_km: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Open,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Maintenance {
    #[serde(flatten)]
    pub diagnosis: Map<String, Value>,
    pub vehicle_id: String,
    pub driver_report: String,
    pub km: u32,
    pub status: MaintenanceStatus,
}

impl Maintenance {
    pub fn new(mut diagnosis: Map<String, Value>, report: MaintenanceReport) -> Self {
        super::strip_reserved(
            &mut diagnosis,
            &["vehicle_id", "driver_report", "km", "status"],
        );

        Self {
            diagnosis,
            vehicle_id: report.vehicle_id,
            driver_report: report.driver_report,
            km: report.current_km,
            status: MaintenanceStatus::Open,
        }
    }
}

#[test]
fn gateway_fields_override_model_output() {
    let diagnosis = serde_json::json!({
        "diagnostico_preliminar": "pastilhas gastas",
        "status": "hallucinated",
    });
    let report = MaintenanceReport {
        vehicle_id: "ABC1D23".into(),
        driver_report: "barulho ao frear".into(),
        current_km: 84_000,
    };

    let maintenance = Maintenance::new(diagnosis.as_object().unwrap().clone(), report);
    let text = serde_json::to_string(&maintenance).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(text.matches("\"status\"").count(), 1);

    assert_eq!(value["status"], "open");
    assert_eq!(value["km"], 84_000);
    assert_eq!(value["diagnostico_preliminar"], "pastilhas gastas");
}
