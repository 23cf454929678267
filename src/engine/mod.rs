mod chat_api;
mod claim_api;
mod helpers;
mod maintenance_api;
mod prompts;
mod receipt_api;
mod route_api;

use std::sync::Arc;

use crate::{
    api::API,
    config::{Config, GeocodingProvider},
    db::{DynStore, MemoryStore, PgStore},
    error::Error,
    external::{
        cloud_storage::CloudStorage, gemini::Gemini, opencage::OpenCage,
        openrouteservice::OpenRouteService,
    },
    generation::DynGenerator,
    geocoding::DynGeocoder,
    routing::DynDirections,
    storage::DynBlobStore,
};

/// Implements every API operation on top of the external collaborators. The
/// collaborators are built once and shared read-only between requests.
pub struct Engine {
    generator: Arc<DynGenerator>,
    geocoder: Arc<DynGeocoder>,
    directions: Arc<DynDirections>,
    store: Arc<DynStore>,
    blobs: Arc<DynBlobStore>,
}

impl Engine {
    pub fn new(
        generator: Arc<DynGenerator>,
        geocoder: Arc<DynGeocoder>,
        directions: Arc<DynDirections>,
        store: Arc<DynStore>,
        blobs: Arc<DynBlobStore>,
    ) -> Self {
        Self {
            generator,
            geocoder,
            directions,
            store,
            blobs,
        }
    }

    #[tracing::instrument(name = "Engine::from_config", skip_all)]
    pub async fn from_config(config: &Config) -> Result<Self, Error> {
        let store: Arc<DynStore> = match &config.database_url {
            Some(url) => Arc::new(PgStore::new(url, config.max_connections).await?),
            None => {
                tracing::warn!("DATABASE_URL is not set, records are kept in memory");
                Arc::new(MemoryStore::new())
            }
        };

        let ors = Arc::new(OpenRouteService::new(
            config.openrouteservice_api_key.clone(),
            config.locale.clone(),
        )?);

        let geocoder: Arc<DynGeocoder> = match config.geocoding_provider {
            GeocodingProvider::OpenCage => Arc::new(OpenCage::new(
                config.opencage_api_key.clone(),
                config.locale.clone(),
            )?),
            GeocodingProvider::OpenRouteService => ors.clone() as Arc<DynGeocoder>,
        };
        tracing::info!(provider = geocoder.name(), "geocoding provider selected");

        let generator = Arc::new(Gemini::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        )?);

        let blobs = Arc::new(CloudStorage::new(
            config.storage_bucket.clone(),
            config.storage_access_token.clone(),
        )?);

        Ok(Self::new(generator, geocoder, ors, store, blobs))
    }
}

impl API for Engine {}
