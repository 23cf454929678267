use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

pub const DEFAULT_ROUTE_NAME: &str = "Rota sem nome";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    #[serde(default)]
    pub route_name: Option<String>,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub stops: Vec<Stop>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stop {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RouteRequest {
    pub fn name(&self) -> &str {
        self.route_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ROUTE_NAME)
    }

    /// `[origin] + stops + [destination]`, the order the route visits them.
    pub fn addresses(&self) -> Vec<String> {
        let mut addresses = Vec::with_capacity(self.stops.len() + 2);
        addresses.push(self.origin.clone());
        addresses.extend(self.stops.iter().map(|stop| stop.address.clone()));
        addresses.push(self.destination.clone());
        addresses
    }
}

/// Distance and duration at display precision.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_minutes: i64,
}

impl RouteSummary {
    pub fn from_meters_and_seconds(meters: f64, seconds: f64) -> Self {
        Self {
            distance_km: (meters / 1000.0 * 100.0).round() / 100.0,
            duration_minutes: (seconds / 60.0).round() as i64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Planned,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub route_name: String,
    pub origin: String,
    pub destination: String,
    pub stops: Vec<Stop>,
    pub distance_km: f64,
    pub duration_minutes: i64,
    pub coordinates: Vec<Coordinates>,
    pub summary: String,
    pub status: RouteStatus,
}

impl RouteResult {
    pub fn new(
        request: RouteRequest,
        route: RouteSummary,
        coordinates: Vec<Coordinates>,
        summary: String,
    ) -> Self {
        Self {
            route_name: request.name().to_string(),
            origin: request.origin,
            destination: request.destination,
            stops: request.stops,
            distance_km: route.distance_km,
            duration_minutes: route.duration_minutes,
            coordinates,
            summary,
            status: RouteStatus::Planned,
        }
    }
}
