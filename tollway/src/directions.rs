//! Driving directions lookup.
//!
//! [`DirectionsClient`] asks the Google Directions API for a single driving
//! route and flattens its route/leg/step tree into a [`RouteSummary`].
//!
//! Only `routes[0]` is ever read. The request sets `alternatives=false`, so
//! the provider returns one route and no tie-break is needed.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{Provider, Result, RouteError};

/// Marker the provider puts in a step's instructions when it uses a toll road.
const TOLL_ROAD_MARKER: &str = "toll road";

/// Flattened view of the chosen route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    /// Encoded polyline covering the whole route.
    pub overview_polyline: String,
    /// Encoded polyline of every step, in leg-then-step order.
    pub step_polylines: Vec<String>,
    /// Sum of leg distances in meters.
    pub total_distance_m: u64,
    /// Sum of leg durations in seconds.
    pub total_duration_s: u64,
    /// Whether any leg passes over a toll road.
    pub has_tolls: bool,
}

/// Top-level Directions API response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    pub overview_polyline: Polyline,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
pub struct Polyline {
    pub points: String,
}

#[derive(Debug, Deserialize)]
pub struct Leg {
    pub distance: Measure,
    pub duration: Measure,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Leg {
    /// A leg is tolled when any of its steps is.
    pub fn has_tolls(&self) -> bool {
        self.steps.iter().any(Step::is_tolled)
    }
}

/// A `{ "text": ..., "value": ... }` pair; only the numeric value is used.
#[derive(Debug, Deserialize)]
pub struct Measure {
    pub value: u64,
}

#[derive(Debug, Deserialize)]
pub struct Step {
    pub polyline: Polyline,
    #[serde(default)]
    pub html_instructions: String,
}

impl Step {
    fn is_tolled(&self) -> bool {
        self.html_instructions
            .to_lowercase()
            .contains(TOLL_ROAD_MARKER)
    }
}

/// Flatten a provider route into a [`RouteSummary`].
pub fn summarize(route: &Route) -> RouteSummary {
    let step_polylines = route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .map(|step| step.polyline.points.clone())
        .collect();

    RouteSummary {
        overview_polyline: route.overview_polyline.points.clone(),
        step_polylines,
        total_distance_m: route.legs.iter().map(|leg| leg.distance.value).sum(),
        total_duration_s: route.legs.iter().map(|leg| leg.duration.value).sum(),
        has_tolls: route.legs.iter().any(Leg::has_tolls),
    }
}

/// Client for the Google Directions API.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    client: Client,
    url: String,
    api_key: String,
}

impl DirectionsClient {
    pub fn new(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Look up the driving route between two addresses.
    ///
    /// # Errors
    ///
    /// - [`RouteError::MissingAddresses`] if either address is empty
    /// - [`RouteError::Directions`] if the provider status is not `OK`
    /// - [`RouteError::Http`] or [`RouteError::MalformedResponse`] on transport
    ///   or decoding failures
    pub async fn lookup(&self, origin: &str, destination: &str) -> Result<RouteSummary> {
        if origin.is_empty() || destination.is_empty() {
            return Err(RouteError::MissingAddresses);
        }

        tracing::debug!(origin, destination, "Requesting directions");

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving"),
                ("alternatives", "false"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RouteError::http(Provider::Directions, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| RouteError::http(Provider::Directions, e))?;
        let directions: DirectionsResponse = serde_json::from_str(&body)
            .map_err(|e| RouteError::malformed(Provider::Directions, e))?;

        if directions.status != "OK" {
            tracing::warn!(
                origin,
                destination,
                status = %directions.status,
                message = directions.error_message.as_deref().unwrap_or(""),
                "Directions lookup failed"
            );
            return Err(RouteError::Directions {
                status: directions.status,
            });
        }

        let route = directions.routes.first().ok_or_else(|| {
            RouteError::malformed(Provider::Directions, "status OK but no routes")
        })?;

        let summary = summarize(route);
        tracing::info!(
            origin,
            destination,
            legs = route.legs.len(),
            distance_m = summary.total_distance_m,
            duration_s = summary.total_duration_s,
            "Route found"
        );
        Ok(summary)
    }
}
