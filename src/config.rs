use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::{invalid_configuration_error, Error};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeocodingProvider {
    OpenCage,
    OpenRouteService,
}

impl FromStr for GeocodingProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opencage" => Ok(Self::OpenCage),
            "openrouteservice" | "ors" => Ok(Self::OpenRouteService),
            other => Err(invalid_configuration_error(format!(
                "unknown GEOCODING_PROVIDER {:?}, expected opencage or openrouteservice",
                other
            ))),
        }
    }
}

/// Locale hints sent with every geocoding query.
#[derive(Clone, Debug)]
pub struct Locale {
    pub country: String,
    pub language: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            country: "br".into(),
            language: "pt".into(),
        }
    }
}

/// Process configuration, read once at startup. Credentials are optional here
/// and checked by each client on first use.
#[derive(Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub geocoding_provider: GeocodingProvider,
    pub opencage_api_key: Option<String>,
    pub openrouteservice_api_key: Option<String>,
    pub locale: Locale,
    pub storage_bucket: Option<String>,
    pub storage_access_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_address = var("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into())
            .parse()
            .map_err(|e| {
                invalid_configuration_error(format!("invalid BIND_ADDRESS: {}", e))
            })?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v.parse().map_err(|e| {
                invalid_configuration_error(format!("invalid DATABASE_MAX_CONNECTIONS: {}", e))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let geocoding_provider = match var("GEOCODING_PROVIDER") {
            Some(v) => v.parse()?,
            None => GeocodingProvider::OpenCage,
        };

        let defaults = Locale::default();
        let locale = Locale {
            country: var("GEOCODING_COUNTRY").unwrap_or(defaults.country),
            language: var("GEOCODING_LANGUAGE").unwrap_or(defaults.language),
        };

        Ok(Self {
            bind_address,
            database_url: var("DATABASE_URL"),
            max_connections,
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
            geocoding_provider,
            opencage_api_key: var("OPENCAGE_API_KEY"),
            openrouteservice_api_key: var("OPENROUTESERVICE_API_KEY"),
            locale,
            storage_bucket: var("STORAGE_BUCKET"),
            storage_access_token: var("STORAGE_ACCESS_TOKEN"),
        })
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("database", &self.database_url.is_some())
            .field("max_connections", &self.max_connections)
            .field("gemini_model", &self.gemini_model)
            .field("geocoding_provider", &self.geocoding_provider)
            .field("locale", &self.locale)
            .field("storage_bucket", &self.storage_bucket)
            .finish_non_exhaustive()
    }
}
