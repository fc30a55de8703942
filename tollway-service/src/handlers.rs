//! HTTP request handlers for the route service.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tollway::{ErrorKind, FareInput, Provider, RouteError, RouteResponse, RouteTolls};
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

/// Query parameters for the route and coordinates endpoints.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct AddressQuery {
    /// Free-form origin address.
    pub origin: Option<String>,
    /// Free-form destination address.
    pub destination: Option<String>,
}

/// Query parameters for the fare endpoint.
///
/// A non-empty `polyline` is priced directly; otherwise `origin` and
/// `destination` are routed first.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct FareQuery {
    /// Encoded route polyline.
    pub polyline: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Successful route response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteBody {
    /// Encoded polyline of the whole route.
    pub overview_polyline: String,
    /// Encoded polyline of each step, when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_route_points: Option<Vec<String>>,
    /// Total distance in meters.
    pub total_distance_m: u64,
    /// Total duration in seconds.
    pub total_duration_s: u64,
    /// Whether the route uses a toll road (flag mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolls: Option<bool>,
    /// Estimated toll cost (cost mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toll_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl From<RouteResponse> for RouteBody {
    fn from(response: RouteResponse) -> Self {
        let summary = response.summary;
        let mut body = RouteBody {
            overview_polyline: summary.overview_polyline,
            detailed_route_points: response
                .include_step_polylines
                .then_some(summary.step_polylines),
            total_distance_m: summary.total_distance_m,
            total_duration_s: summary.total_duration_s,
            tolls: None,
            toll_cost: None,
            currency: None,
        };

        match response.tolls {
            Some(RouteTolls::Flag(flag)) => body.tolls = Some(flag),
            Some(RouteTolls::Cost(estimate)) => {
                body.toll_cost = Some(estimate.toll_cost);
                body.currency = Some(estimate.currency.to_string());
            }
            None => {}
        }
        body
    }
}

/// Toll cost response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FareBody {
    /// Total toll cost.
    pub toll_cost: f64,
    /// Always `AUD`.
    pub currency: String,
}

/// A geocoded position.
#[derive(Debug, Serialize, ToSchema)]
pub struct CoordinateBody {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<tollway::Coordinate> for CoordinateBody {
    fn from(coord: tollway::Coordinate) -> Self {
        Self {
            latitude: coord.latitude,
            longitude: coord.longitude,
        }
    }
}

/// Geocoded origin and destination.
#[derive(Debug, Serialize, ToSchema)]
pub struct CoordinatesBody {
    pub origin: CoordinateBody,
    pub destination: CoordinateBody,
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Configured toll mode.
    pub toll_mode: String,
    /// Whether a toll calculator credential is configured.
    pub toll_pricing: bool,
}

/// Get the driving route between two addresses.
///
/// # Returns
///
/// - `200 OK` with the route summary
/// - `400 Bad Request` if an address is missing or a provider call fails
#[utoipa::path(
    get,
    path = "/get-route",
    tag = "route",
    params(AddressQuery),
    responses(
        (status = 200, description = "Route found", body = RouteBody),
        (status = 400, description = "Missing address or provider failure", body = ErrorResponse)
    )
)]
pub async fn get_route(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AddressQuery>,
) -> impl IntoResponse {
    let origin = query.origin.unwrap_or_default();
    let destination = query.destination.unwrap_or_default();

    tracing::debug!(origin = %origin, destination = %destination, "Route query");

    match state.route_service.route(&origin, &destination).await {
        Ok(response) => (StatusCode::OK, Json(RouteBody::from(response))).into_response(),
        Err(e) => error_response("route", e),
    }
}

/// Get the toll cost of a polyline or of the route between two addresses.
#[utoipa::path(
    get,
    path = "/get-fare",
    tag = "route",
    params(FareQuery),
    responses(
        (status = 200, description = "Toll cost estimated", body = FareBody),
        (status = 400, description = "Missing input or provider failure", body = ErrorResponse),
        (status = 503, description = "Toll pricing not configured", body = ErrorResponse)
    )
)]
pub async fn get_fare(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FareQuery>,
) -> impl IntoResponse {
    let input = FareInput {
        polyline: query.polyline,
        origin: query.origin,
        destination: query.destination,
    };

    match state.route_service.fare(input).await {
        Ok(estimate) => (
            StatusCode::OK,
            Json(FareBody {
                toll_cost: estimate.toll_cost,
                currency: estimate.currency.to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response("fare", e),
    }
}

/// Geocode an origin and destination address.
#[utoipa::path(
    get,
    path = "/get-coordinates",
    tag = "route",
    params(AddressQuery),
    responses(
        (status = 200, description = "Both addresses geocoded", body = CoordinatesBody),
        (status = 400, description = "Missing address or no geocoding result", body = ErrorResponse)
    )
)]
pub async fn get_coordinates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AddressQuery>,
) -> impl IntoResponse {
    let origin = query.origin.unwrap_or_default();
    let destination = query.destination.unwrap_or_default();

    match state
        .route_service
        .coordinates(&origin, &destination)
        .await
    {
        Ok(pair) => (
            StatusCode::OK,
            Json(CoordinatesBody {
                origin: pair.origin.into(),
                destination: pair.destination.into(),
            }),
        )
            .into_response(),
        Err(e) => error_response("coordinates", e),
    }
}

/// Map a [`RouteError`] to its status code and JSON body.
fn error_response(operation: &'static str, e: RouteError) -> axum::response::Response {
    let status = match e.kind() {
        ErrorKind::Validation | ErrorKind::Upstream | ErrorKind::Geocode => StatusCode::BAD_REQUEST,
        ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
    };

    tracing::warn!(operation, status = status.as_u16(), error = %e, "Request failed");

    // Provider statuses, bodies and parser output stay in the log.
    let message = match (e.kind(), e.provider()) {
        (ErrorKind::Upstream, Some(Provider::Directions)) => "Failed to retrieve directions",
        (ErrorKind::Upstream, Some(Provider::Tolls)) => "Failed to retrieve toll cost",
        (ErrorKind::Upstream, Some(Provider::Geocoding)) => "Failed to retrieve coordinates",
        (ErrorKind::Upstream, None) => "Upstream request failed",
        _ => return (status, Json(ErrorResponse { error: e.to_string() })).into_response(),
    };

    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        toll_mode: state.route_service.toll_mode().to_string(),
        toll_pricing: state.route_service.has_toll_pricing(),
    })
}
