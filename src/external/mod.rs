pub mod cloud_storage;
pub mod gemini;
pub mod opencage;
pub mod openrouteservice;

use std::time::Duration;

use serde_json::Value;

use crate::entities::Coordinates;
use crate::error::{upstream_error, Error};

fn http_client(timeout: Duration) -> Result<reqwest::Client, Error> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Reads the whole body and turns a non-success status into an upstream error.
async fn read_success(service: &str, res: reqwest::Response) -> Result<String, Error> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(upstream_error(service, status.as_u16(), &body));
    }

    Ok(body)
}

/// Providers disagree on whether coordinates are numbers or strings.
fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coordinates(lng: &Value, lat: &Value) -> Option<Coordinates> {
    let (lng, lat) = (as_float(lng)?, as_float(lat)?);

    match Coordinates::new(lng, lat) {
        Ok(coordinates) => Some(coordinates),
        Err(err) => {
            tracing::warn!(error = %err, "provider returned unusable coordinates");
            None
        }
    }
}

#[test]
fn coerces_numbers_and_strings() {
    use serde_json::json;

    assert_eq!(as_float(&json!(-46.63)), Some(-46.63));
    assert_eq!(as_float(&json!(" -23.5 ")), Some(-23.5));
    assert_eq!(as_float(&json!("north")), None);
    assert_eq!(as_float(&json!(null)), None);

    assert!(coordinates(&json!(-46.63), &json!("-23.55")).is_some());
    assert!(coordinates(&json!(-23.55), &json!(-246.63)).is_none());
}
