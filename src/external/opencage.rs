use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Locale;
use crate::entities::Coordinates;
use crate::error::{configuration_error, Error};
use crate::geocoding::Geocoder;

const API_URL: &str = "https://api.opencagedata.com/geocode/v1/json";
const TIMEOUT: Duration = Duration::from_secs(60);
// Free tier allows one request per second.
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// OpenCage forward geocoding. The key travels as a query parameter.
pub struct OpenCage {
    client: reqwest::Client,
    api_key: Option<String>,
    locale: Locale,
}

impl OpenCage {
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
            .ok_or_else(|| configuration_error("OPENCAGE_API_KEY"))
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    results: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: Value,
    lng: Value,
}

fn parse(body: &str) -> Result<Option<Coordinates>, Error> {
    let data: Response = serde_json::from_str(body)?;

    Ok(data
        .results
        .first()
        .and_then(|best| super::coordinates(&best.geometry.lng, &best.geometry.lat)))
}

#[async_trait]
impl Geocoder for OpenCage {
    fn name(&self) -> &'static str {
        "opencage"
    }

    fn ready(&self) -> Result<(), Error> {
        self.api_key().map(|_| ())
    }

    fn min_interval(&self) -> Duration {
        MIN_INTERVAL
    }

    #[tracing::instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, Error> {
        let res = self
            .client
            .get(API_URL)
            .query(&[("q", address), ("key", self.api_key()?)])
            .query(&[
                ("countrycode", self.locale.country.as_str()),
                ("language", self.locale.language.as_str()),
                ("limit", "1"),
                ("no_annotations", "1"),
            ])
            .send()
            .await?;

        let body = super::read_success(self.name(), res).await?;

        parse(&body)
    }
}
