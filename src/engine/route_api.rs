use super::{helpers::require_text, prompts, Engine};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::RouteAPI,
    db::{find_record, insert_record, Document, ROUTES},
    entities::{Coordinates, RouteRequest, RouteResult},
    error::{address_resolution_error, insufficient_waypoints_error, Error},
    generation::Prompt,
    geocoding::geocode_batch,
    routing::compute_route,
};

/// Where a route plan is in its pipeline. Every stage only moves forward; a
/// failure at any stage ends the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Received,
    Geocoding,
    GeocodeValidated,
    Routing,
    RouteValidated,
    Summarizing,
    Persisting,
    Done,
}

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self, request), fields(route = request.name()))]
    async fn plan_route(&self, request: RouteRequest) -> Result<Document<RouteResult>, Error> {
        let mut stage = Stage::Received;

        match self.run_plan(request, &mut stage).await {
            Ok(route) => {
                advance(&mut stage, Stage::Done);
                tracing::info!(id = %route.id, "route planned");
                Ok(route)
            }
            Err(err) => {
                tracing::warn!(?stage, error = %err, "route planning failed");
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_route(&self, id: Uuid) -> Result<Document<RouteResult>, Error> {
        find_record(self.store.as_ref(), ROUTES, id).await
    }
}

impl Engine {
    async fn run_plan(
        &self,
        request: RouteRequest,
        stage: &mut Stage,
    ) -> Result<Document<RouteResult>, Error> {
        require_text("origin", &request.origin)?;
        require_text("destination", &request.destination)?;
        for (index, stop) in request.stops.iter().enumerate() {
            require_text(&format!("stops[{}].address", index), &stop.address)?;
        }
        let addresses = request.addresses();

        advance(stage, Stage::Geocoding);
        let resolved = geocode_batch(self.geocoder.as_ref(), &addresses).await?;

        let coordinates = resolved_waypoints(&addresses, resolved)?;
        advance(stage, Stage::GeocodeValidated);

        advance(stage, Stage::Routing);
        let route = compute_route(self.directions.as_ref(), &coordinates).await?;
        advance(stage, Stage::RouteValidated);

        advance(stage, Stage::Summarizing);
        let summary = self
            .generator
            .generate(Prompt::text(prompts::route_summary(&request, &route)))
            .await?;

        advance(stage, Stage::Persisting);
        let result = RouteResult::new(request, route, coordinates, summary.trim().to_string());

        insert_record(self.store.as_ref(), ROUTES, result).await
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug_assert!(next > *stage, "route stage moved back from {:?} to {:?}", stage, next);
    tracing::debug!(from = ?*stage, to = ?next, "route stage");
    *stage = next;
}

/// Fails on the first address, in visiting order, that did not resolve.
fn resolved_waypoints(
    addresses: &[String],
    resolved: Vec<Option<Coordinates>>,
) -> Result<Vec<Coordinates>, Error> {
    if let Some(position) = resolved.iter().position(Option::is_none) {
        return Err(address_resolution_error(&addresses[position]));
    }

    let coordinates: Vec<Coordinates> = resolved.into_iter().flatten().collect();
    if coordinates.len() < 2 {
        return Err(insufficient_waypoints_error(coordinates.len()));
    }

    Ok(coordinates)
}
