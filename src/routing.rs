use async_trait::async_trait;

use crate::entities::{Coordinates, RouteSummary};
use crate::error::{insufficient_waypoints_error, Error};

/// Raw totals as the routing provider reports them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Directions {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// A driving-directions provider. Implementations return a `NO_ROUTE` error
/// when the provider answers but has no route for the waypoints.
#[async_trait]
pub trait DirectionsProvider {
    fn name(&self) -> &'static str;

    async fn directions(&self, waypoints: &[Coordinates]) -> Result<Directions, Error>;
}

pub type DynDirections = dyn DirectionsProvider + Send + Sync;

/// Requests a driving route through `waypoints` in order and reports it at
/// display precision (km to 2 decimals, whole minutes).
#[tracing::instrument(skip(provider, waypoints), fields(provider = provider.name(), waypoints = waypoints.len()))]
pub async fn compute_route(
    provider: &DynDirections,
    waypoints: &[Coordinates],
) -> Result<RouteSummary, Error> {
    if waypoints.len() < 2 {
        return Err(insufficient_waypoints_error(waypoints.len()));
    }

    let directions = provider.directions(waypoints).await?;

    Ok(RouteSummary::from_meters_and_seconds(
        directions.distance_meters,
        directions.duration_seconds,
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{no_route_error, INSUFFICIENT_WAYPOINTS, NO_ROUTE};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub(crate) struct FakeDirections {
        pub answer: Option<Directions>,
        pub message: Option<String>,
        pub calls: AtomicUsize,
        pub last_waypoints: Mutex<Vec<Coordinates>>,
    }

    impl FakeDirections {
        pub(crate) fn route(distance_meters: f64, duration_seconds: f64) -> Self {
            Self {
                answer: Some(Directions {
                    distance_meters,
                    duration_seconds,
                }),
                message: None,
                calls: AtomicUsize::new(0),
                last_waypoints: Mutex::new(vec![]),
            }
        }

        pub(crate) fn no_route(message: Option<&str>) -> Self {
            Self {
                answer: None,
                message: message.map(String::from),
                calls: AtomicUsize::new(0),
                last_waypoints: Mutex::new(vec![]),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DirectionsProvider for FakeDirections {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn directions(&self, waypoints: &[Coordinates]) -> Result<Directions, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_waypoints.lock().unwrap() = waypoints.to_vec();

            self.answer.ok_or_else(|| no_route_error(self.message.clone()))
        }
    }

    fn point(lng: f64, lat: f64) -> Coordinates {
        Coordinates::new(lng, lat).unwrap()
    }

    #[tokio::test]
    async fn rejects_fewer_than_two_waypoints_without_calling() {
        let provider = FakeDirections::route(1_000.0, 60.0);

        for waypoints in [vec![], vec![point(-46.63, -23.55)]] {
            let err = compute_route(&provider, &waypoints).await.unwrap_err();
            assert_eq!(err.code, INSUFFICIENT_WAYPOINTS);
        }

        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn converts_units() {
        let provider = FakeDirections::route(15_432.1, 1_499.0);
        let waypoints = [point(-46.63, -23.55), point(-46.65, -23.56), point(-46.65, -23.62)];

        let summary = compute_route(&provider, &waypoints).await.unwrap();

        assert_eq!(summary.distance_km, 15.43);
        assert_eq!(summary.duration_minutes, 25);
        assert_eq!(*provider.last_waypoints.lock().unwrap(), waypoints.to_vec());
    }

    #[tokio::test]
    async fn duration_rounds_half_up() {
        let waypoints = [point(0.0, 0.0), point(0.1, 0.1)];

        let summary = compute_route(&FakeDirections::route(1.0, 149.0), &waypoints)
            .await
            .unwrap();
        assert_eq!(summary.duration_minutes, 2);

        let summary = compute_route(&FakeDirections::route(1.0, 150.0), &waypoints)
            .await
            .unwrap();
        assert_eq!(summary.duration_minutes, 3);
    }

    #[tokio::test]
    async fn passes_through_no_route() {
        let provider = FakeDirections::no_route(Some("Route could not be found"));
        let waypoints = [point(0.0, 0.0), point(0.1, 0.1)];

        let err = compute_route(&provider, &waypoints).await.unwrap_err();

        assert_eq!(err.code, NO_ROUTE);
        assert_eq!(err.message, "Route could not be found");
    }
}
