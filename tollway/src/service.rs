//! Request orchestration.
//!
//! [`RouteService`] owns the three provider clients and composes them into
//! the operations the HTTP surface exposes. Each call is independent; the
//! service holds no per-request state and can be shared behind an `Arc`.
//!
//! ```ignore
//! use tollway::{RouteService, ServiceConfig, TollMode};
//!
//! let config = ServiceConfig::new("google-key")
//!     .toll_api_key("nsw-key")
//!     .toll_mode(TollMode::Cost);
//! let service = RouteService::new(config)?;
//!
//! let response = service.route("Sydney Airport", "Parramatta").await?;
//! println!("{} m, {:?}", response.summary.total_distance_m, response.tolls);
//! ```

use reqwest::Client;

use crate::config::{ServiceConfig, TollMode};
use crate::directions::{DirectionsClient, RouteSummary};
use crate::error::{Result, RouteError};
use crate::geocode::{Coordinate, Geocoder};
use crate::tolls::{TollEstimate, TollEstimator};

/// Toll information attached to a route, depending on [`TollMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum RouteTolls {
    Flag(bool),
    Cost(TollEstimate),
}

/// Result of [`RouteService::route`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    pub summary: RouteSummary,
    /// Whether `summary.step_polylines` should be exposed to callers.
    pub include_step_polylines: bool,
    /// `None` when the deployment does not report tolls.
    pub tolls: Option<RouteTolls>,
}

/// Input accepted by [`RouteService::fare`].
#[derive(Debug, Clone, Default)]
pub struct FareInput {
    pub polyline: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Geocoded origin and destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinatePair {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

/// Routes, prices and geocodes address pairs.
#[derive(Debug, Clone)]
pub struct RouteService {
    directions: DirectionsClient,
    geocoder: Geocoder,
    tolls: Option<TollEstimator>,
    toll_mode: TollMode,
    include_step_polylines: bool,
}

impl RouteService {
    /// Build the shared HTTP client and provider clients.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Config`] if the configuration is inconsistent or
    /// the HTTP client cannot be initialised.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tollway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RouteError::Config(format!("failed to build HTTP client: {e}")))?;

        let directions = DirectionsClient::new(
            client.clone(),
            config.directions_url,
            config.directions_api_key.clone(),
        );
        let geocoder = Geocoder::new(
            client.clone(),
            config.geocode_url,
            config.directions_api_key,
        );
        let tolls = config
            .toll_api_key
            .map(|key| TollEstimator::new(client, config.toll_url, key));

        Ok(Self {
            directions,
            geocoder,
            tolls,
            toll_mode: config.toll_mode,
            include_step_polylines: config.include_step_polylines,
        })
    }

    pub fn toll_mode(&self) -> TollMode {
        self.toll_mode
    }

    /// Whether a toll credential is configured.
    pub fn has_toll_pricing(&self) -> bool {
        self.tolls.is_some()
    }

    /// Route between two addresses and attach tolls according to the mode.
    ///
    /// A directions failure short-circuits before any toll request. A toll
    /// estimation failure fails the whole request.
    pub async fn route(&self, origin: &str, destination: &str) -> Result<RouteResponse> {
        let summary = self.directions.lookup(origin, destination).await?;

        let tolls = match self.toll_mode {
            TollMode::None => None,
            TollMode::Flag => Some(RouteTolls::Flag(summary.has_tolls)),
            TollMode::Cost => {
                let estimate = self.estimator()?.estimate(&summary.overview_polyline).await?;
                Some(RouteTolls::Cost(estimate))
            }
        };

        Ok(RouteResponse {
            summary,
            include_step_polylines: self.include_step_polylines,
            tolls,
        })
    }

    /// Price a polyline, or the route between two addresses.
    ///
    /// A non-empty polyline takes precedence over addresses.
    pub async fn fare(&self, input: FareInput) -> Result<TollEstimate> {
        let estimator = self.estimator()?;

        if let Some(polyline) = non_empty(input.polyline.as_deref()) {
            return estimator.estimate(polyline).await;
        }

        match (
            non_empty(input.origin.as_deref()),
            non_empty(input.destination.as_deref()),
        ) {
            (Some(origin), Some(destination)) => {
                let summary = self.directions.lookup(origin, destination).await?;
                estimator.estimate(&summary.overview_polyline).await
            }
            _ => Err(RouteError::MissingFareInput),
        }
    }

    /// Geocode both addresses concurrently.
    pub async fn coordinates(&self, origin: &str, destination: &str) -> Result<CoordinatePair> {
        if origin.is_empty() || destination.is_empty() {
            return Err(RouteError::MissingAddresses);
        }

        let (origin, destination) = tokio::try_join!(
            self.geocoder.locate(origin),
            self.geocoder.locate(destination)
        )?;

        Ok(CoordinatePair {
            origin,
            destination,
        })
    }

    fn estimator(&self) -> Result<&TollEstimator> {
        self.tolls.as_ref().ok_or(RouteError::TollsDisabled)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
