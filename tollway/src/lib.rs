//! # Tollway - Driving Route and Toll Cost Aggregation
//!
//! Combines two third-party APIs into one answer: the Google Directions API
//! for the route itself and the Transport for NSW toll calculator for the
//! price of the motorways it uses.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tollway::{RouteService, ServiceConfig};
//!
//! let service = RouteService::new(ServiceConfig::from_env()?)?;
//! let response = service.route("Sydney Airport", "Macquarie Park").await?;
//! println!(
//!     "{} m in {} s",
//!     response.summary.total_distance_m, response.summary.total_duration_s
//! );
//! ```
//!
//! ## Components
//!
//! - [`directions`]: one driving route, flattened into a [`RouteSummary`]
//! - [`tolls`]: per-toll-point charges summed into a [`TollEstimate`] (AUD)
//! - [`geocode`]: address to [`Coordinate`], first result only
//! - [`service`]: sequential composition of the above
//!
//! Nothing is cached or retried. A failed upstream call fails the request.

pub mod config;
pub mod directions;
pub mod error;
pub mod geocode;
pub mod service;
pub mod tolls;

// Re-export main types at crate root for convenience
pub use config::{ServiceConfig, TollMode};
pub use directions::{DirectionsClient, RouteSummary};
pub use error::{ErrorKind, Provider, Result, RouteError};
pub use geocode::{Coordinate, Geocoder};
pub use service::{CoordinatePair, FareInput, RouteResponse, RouteService, RouteTolls};
pub use tolls::{TollEstimate, TollEstimator, CURRENCY};
