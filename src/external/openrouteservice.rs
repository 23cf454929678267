use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Locale;
use crate::entities::Coordinates;
use crate::error::{
    configuration_error, malformed_payload_error, no_route_error, upstream_error, Error,
};
use crate::geocoding::Geocoder;
use crate::routing::{Directions, DirectionsProvider};

const API_BASE: &str = "https://api.openrouteservice.org";
const TIMEOUT: Duration = Duration::from_secs(60);

/// OpenRouteService geocoding (Pelias) and driving directions. The key is
/// sent in the `Authorization` header.
pub struct OpenRouteService {
    client: reqwest::Client,
    api_key: Option<String>,
    locale: Locale,
}

impl OpenRouteService {
    pub fn new(api_key: Option<String>, locale: Locale) -> Result<Self, Error> {
        Ok(Self {
            client: super::http_client(TIMEOUT)?,
            api_key,
            locale,
        })
    }

    fn api_key(&self) -> Result<&str, Error> {
        self.api_key
            .as_deref()
            .ok_or_else(|| configuration_error("OPENROUTESERVICE_API_KEY"))
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<Value>,
}

fn parse_geocode(body: &str) -> Result<Option<Coordinates>, Error> {
    let data: FeatureCollection = serde_json::from_str(body)?;

    Ok(data.features.first().and_then(|best| {
        match best.geometry.coordinates.as_slice() {
            [lng, lat, ..] => super::coordinates(lng, lat),
            _ => None,
        }
    }))
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Route>,
    error: Option<ErrorPayload>,
}

#[derive(Debug, Deserialize)]
struct Route {
    summary: Summary,
}

// Both fields are omitted when origin and destination coincide.
#[derive(Debug, Default, Deserialize)]
struct Summary {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Detailed { message: String },
    Text(String),
}

impl ErrorPayload {
    fn message(self) -> String {
        match self {
            Self::Detailed { message } | Self::Text(message) => message,
        }
    }
}

/// Statuses that mean the call itself was refused rather than that no route
/// exists.
fn is_service_failure(status: u16) -> bool {
    matches!(status, 401 | 403 | 429) || status >= 500
}

fn parse_directions(status: u16, body: &str) -> Result<Directions, Error> {
    if is_service_failure(status) {
        return Err(upstream_error("openrouteservice", status, body));
    }

    let data: DirectionsResponse = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(_) if (200..300).contains(&status) => {
            return Err(malformed_payload_error(
                "openrouteservice returned an unreadable directions response",
            ))
        }
        Err(_) => return Err(upstream_error("openrouteservice", status, body)),
    };

    if (200..300).contains(&status) {
        if let Some(route) = data.routes.first() {
            return Ok(Directions {
                distance_meters: route.summary.distance,
                duration_seconds: route.summary.duration,
            });
        }
    }

    Err(no_route_error(data.error.map(ErrorPayload::message)))
}

#[async_trait]
impl Geocoder for OpenRouteService {
    fn name(&self) -> &'static str {
        "openrouteservice"
    }

    fn ready(&self) -> Result<(), Error> {
        self.api_key().map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, Error> {
        let res = self
            .client
            .get(format!("{}/geocode/search", API_BASE))
            .header(AUTHORIZATION, self.api_key()?)
            .query(&[
                ("text", address),
                ("boundary.country", self.locale.country.as_str()),
                ("lang", self.locale.language.as_str()),
                ("size", "1"),
            ])
            .send()
            .await?;

        let body = super::read_success(Geocoder::name(self), res).await?;

        parse_geocode(&body)
    }
}

#[async_trait]
impl DirectionsProvider for OpenRouteService {
    fn name(&self) -> &'static str {
        "openrouteservice"
    }

    #[tracing::instrument(skip(self, waypoints), fields(waypoints = waypoints.len()))]
    async fn directions(&self, waypoints: &[Coordinates]) -> Result<Directions, Error> {
        let body = json!({ "coordinates": waypoints });

        let res = self
            .client
            .post(format!("{}/v2/directions/driving-car/json", API_BASE))
            .header(AUTHORIZATION, self.api_key()?)
            .json(&body)
            .send()
            .await?;

        let status = res.status().as_u16();
        let text = res.text().await?;

        parse_directions(status, &text)
    }
}
