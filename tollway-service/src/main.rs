//! Tollway Service - HTTP microservice for driving routes and NSW toll costs.
//!
//! Aggregates the Google Directions API and the Transport for NSW toll
//! calculator behind three GET endpoints.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GOOGLE_MAPS_API_KEY` | Directions and geocoding API key | Required |
//! | `NSW_TOLL_API_KEY` | Toll calculator credential | None |
//! | `PORT` | HTTP server port | 5000 |
//! | `HOST` | HTTP bind address | 0.0.0.0 |
//! | `TOLLWAY_TOLL_MODE` | Toll fields on `/get-route`: "none", "flag", "cost" | none |
//! | `TOLLWAY_STEP_POLYLINES` | Include `detailed_route_points` | true |
//! | `TOLLWAY_HTTP_TIMEOUT_SECS` | Outbound request timeout | 10 |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /get-route?origin=A&destination=B` - Route summary, optionally with tolls
//! - `GET /get-fare?polyline=P` - Toll cost of a polyline (or `origin` + `destination`)
//! - `GET /get-coordinates?origin=A&destination=B` - Geocode both addresses
//! - `GET /health` - Health check
//! - `GET /docs` - OpenAPI documentation (Swagger UI)

use std::sync::Arc;

use tollway::{RouteService, ServiceConfig};
use tollway_service::{bind, handlers, router, AppState};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation for the Tollway service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tollway Route Service",
        version = "0.1.0",
        description = "Driving routes from Google Directions with toll costs from the Transport for NSW toll calculator.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::get_route,
        handlers::get_fare,
        handlers::get_coordinates,
        handlers::health_check,
    ),
    components(
        schemas(
            handlers::RouteBody,
            handlers::FareBody,
            handlers::CoordinateBody,
            handlers::CoordinatesBody,
            handlers::ErrorResponse,
            handlers::HealthResponse,
        )
    ),
    tags(
        (name = "route", description = "Route, fare and geocoding endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tollway_service=info,tollway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    tracing::info!(
        host = %config.host,
        port = config.port,
        toll_mode = %config.toll_mode,
        toll_pricing = config.toll_api_key.is_some(),
        step_polylines = config.include_step_polylines,
        timeout_secs = config.timeout.as_secs(),
        "Starting Tollway service"
    );

    let host = config.host.clone();
    let port = config.port;
    let route_service = RouteService::new(config)?;
    let state = Arc::new(AppState { route_service });

    // Build router
    let app = router(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let listener = bind(&host, port).await?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
