use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;

use crate::entities::Coordinates;
use crate::error::Error;

/// A geocoding provider.
///
/// `resolve` distinguishes "no match" (`Ok(None)`) from a failed call
/// (`Err`); [`geocode_batch`] collapses both to an absent position.
#[async_trait]
pub trait Geocoder {
    fn name(&self) -> &'static str;

    /// Fails when the provider cannot be called at all, e.g. a missing key.
    fn ready(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Fixed delay each lookup waits before calling the provider.
    fn min_interval(&self) -> Duration {
        Duration::ZERO
    }

    async fn resolve(&self, address: &str) -> Result<Option<Coordinates>, Error>;
}

pub type DynGeocoder = dyn Geocoder + Send + Sync;

/// Resolves every address concurrently. The output is aligned with the input:
/// position `i` holds the coordinates of `addresses[i]`, or `None` when that
/// lookup failed for any reason. Only an unusable provider fails the batch.
#[tracing::instrument(skip(geocoder), fields(provider = geocoder.name()))]
pub async fn geocode_batch(
    geocoder: &DynGeocoder,
    addresses: &[String],
) -> Result<Vec<Option<Coordinates>>, Error> {
    geocoder.ready()?;

    let lookups = addresses
        .iter()
        .map(|address| geocode_one(geocoder, address));

    Ok(join_all(lookups).await)
}

async fn geocode_one(geocoder: &DynGeocoder, address: &str) -> Option<Coordinates> {
    let delay = geocoder.min_interval();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match geocoder.resolve(address).await {
        Ok(Some(coordinates)) => {
            tracing::debug!(%address, %coordinates, "address resolved");
            Some(coordinates)
        }
        Ok(None) => {
            tracing::warn!(%address, "geocoder found no match");
            None
        }
        Err(err) => {
            tracing::warn!(%address, error = %err, "geocoding request failed");
            None
        }
    }
}
