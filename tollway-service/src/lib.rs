//! Tollway Service Library
//!
//! HTTP handlers and types for the route and toll cost service.
//! This library is used by both the tollway-service binary and integration tests.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tollway::RouteService;

/// Application state shared across handlers.
pub struct AppState {
    /// Provider clients for routing, pricing and geocoding.
    pub route_service: RouteService,
}

/// Build the API router without middleware or documentation routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/get-route", get(handlers::get_route))
        .route("/get-fare", get(handlers::get_fare))
        .route("/get-coordinates", get(handlers::get_coordinates))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

/// Bind the listener on `host:port`.
///
/// `host` may be a hostname (`localhost`) or a bare IPv6 address (`::`); both
/// are resolved by the socket layer rather than parsed as a `SocketAddr`.
pub async fn bind(host: &str, port: u16) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((host, port)).await
}

// Re-export commonly used types for convenience
pub use handlers::{
    AddressQuery, CoordinateBody, CoordinatesBody, ErrorResponse, FareBody, FareQuery,
    HealthResponse, RouteBody,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_accepts_hostname() {
        let listener = bind("localhost", 0).await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_accepts_ip_literal() {
        let listener = bind("127.0.0.1", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }
}
