//! Integration tests for the provider clients (wiremock-based).

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tollway::{
    Coordinate, FareInput, RouteError, RouteService, RouteTolls, ServiceConfig, TollEstimate,
    TollMode,
};

const DIRECTIONS_PATH: &str = "/maps/api/directions/json";
const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const TOLL_PATH: &str = "/v2/roads/toll_calc/match";

fn config_for_mock(base_url: &str) -> ServiceConfig {
    let mut config = ServiceConfig::new("google-test-key").toll_api_key("nsw-test-key");
    config.directions_url = format!("{base_url}{DIRECTIONS_PATH}");
    config.geocode_url = format!("{base_url}{GEOCODE_PATH}");
    config.toll_url = format!("{base_url}{TOLL_PATH}");
    config
}

fn directions_ok() -> serde_json::Value {
    json!({
        "status": "OK",
        "routes": [{
            "summary": "M2",
            "overview_polyline": { "points": "overview-points" },
            "legs": [
                {
                    "distance": { "text": "12.0 km", "value": 12000 },
                    "duration": { "text": "15 mins", "value": 900 },
                    "steps": [
                        { "polyline": { "points": "step-1" }, "html_instructions": "Head west" },
                        { "polyline": { "points": "step-2" }, "html_instructions": "Take the M2<div>Toll road</div>" }
                    ]
                },
                {
                    "distance": { "text": "3.5 km", "value": 3500 },
                    "duration": { "text": "6 mins", "value": 360 },
                    "steps": [
                        { "polyline": { "points": "step-3" }, "html_instructions": "Arrive" }
                    ]
                }
            ]
        }]
    })
}

fn tolls_charged() -> serde_json::Value {
    json!({
        "match": {
            "tollsCharged": [
                { "motorway": "M2", "charges": [{ "chargeInCents": 250 }] },
                { "motorway": "LCT", "charges": [{ "chargeInCents": 150 }] }
            ]
        }
    })
}

async fn mount_directions(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .and(query_param("mode", "driving"))
        .and(query_param("alternatives", "false"))
        .and(query_param("key", "google-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_route_sums_legs() {
    let server = MockServer::start().await;
    mount_directions(&server, directions_ok()).await;

    let service = RouteService::new(config_for_mock(&server.uri())).unwrap();
    let response = service.route("Sydney", "Macquarie Park").await.unwrap();

    assert_eq!(response.summary.overview_polyline, "overview-points");
    assert_eq!(response.summary.total_distance_m, 15500);
    assert_eq!(response.summary.total_duration_s, 1260);
    assert_eq!(
        response.summary.step_polylines,
        vec!["step-1", "step-2", "step-3"]
    );
    assert_eq!(response.tolls, None);
}

#[tokio::test]
async fn test_route_sends_addresses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .and(query_param("origin", "Sydney Airport"))
        .and(query_param("destination", "Parramatta NSW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_ok()))
        .expect(1)
        .mount(&server)
        .await;

    let service = RouteService::new(config_for_mock(&server.uri())).unwrap();
    service
        .route("Sydney Airport", "Parramatta NSW")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_route_flag_mode() {
    let server = MockServer::start().await;
    mount_directions(&server, directions_ok()).await;

    let config = config_for_mock(&server.uri()).toll_mode(TollMode::Flag);
    let service = RouteService::new(config).unwrap();
    let response = service.route("Sydney", "Macquarie Park").await.unwrap();

    assert_eq!(response.tolls, Some(RouteTolls::Flag(true)));
}

#[tokio::test]
async fn test_route_cost_mode_prices_overview_polyline() {
    let server = MockServer::start().await;
    mount_directions(&server, directions_ok()).await;

    Mock::given(method("POST"))
        .and(path(TOLL_PATH))
        .and(header("authorization", "apikey nsw-test-key"))
        .and(body_partial_json(json!({
            "polyline": "overview-points",
            "vehicleClass": "A",
            "includeSteps": false,
            "accuracy": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(tolls_charged()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri()).toll_mode(TollMode::Cost);
    let service = RouteService::new(config).unwrap();
    let response = service.route("Sydney", "Macquarie Park").await.unwrap();

    assert_eq!(
        response.tolls,
        Some(RouteTolls::Cost(TollEstimate {
            toll_cost: 4.0,
            currency: "AUD"
        }))
    );
}

#[tokio::test]
async fn test_directions_failure_skips_tolls() {
    let server = MockServer::start().await;
    mount_directions(
        &server,
        json!({ "status": "NOT_FOUND", "routes": [] }),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(TOLL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(tolls_charged()))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri()).toll_mode(TollMode::Cost);
    let service = RouteService::new(config).unwrap();
    let err = service.route("Atlantis", "Sydney").await.unwrap_err();

    match err {
        RouteError::Directions { status } => assert_eq!(status, "NOT_FOUND"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_ok_without_routes_is_malformed() {
    let server = MockServer::start().await;
    mount_directions(&server, json!({ "status": "OK", "routes": [] })).await;

    let service = RouteService::new(config_for_mock(&server.uri())).unwrap();
    let err = service.route("Sydney", "Newcastle").await.unwrap_err();
    assert!(matches!(err, RouteError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_toll_failure_fails_route() {
    let server = MockServer::start().await;
    mount_directions(&server, directions_ok()).await;

    Mock::given(method("POST"))
        .and(path(TOLL_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message":"Invalid apikey"}"#))
        .mount(&server)
        .await;

    let config = config_for_mock(&server.uri()).toll_mode(TollMode::Cost);
    let service = RouteService::new(config).unwrap();
    let err = service.route("Sydney", "Macquarie Park").await.unwrap_err();

    match err {
        RouteError::TollProvider { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid apikey"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fare_for_polyline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOLL_PATH))
        .and(body_partial_json(json!({ "polyline": "given-polyline" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(tolls_charged()))
        .mount(&server)
        .await;

    let service = RouteService::new(config_for_mock(&server.uri())).unwrap();
    let estimate = service
        .fare(FareInput {
            polyline: Some("given-polyline".to_string()),
            ..FareInput::default()
        })
        .await
        .unwrap();

    assert_eq!(estimate.toll_cost, 4.0);
    assert_eq!(estimate.currency, "AUD");
}

#[tokio::test]
async fn test_fare_without_match_is_zero() {
    let server = MockServer::start().await;
    mount_directions(&server, directions_ok()).await;
    Mock::given(method("POST"))
        .and(path(TOLL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "routes": [] })))
        .mount(&server)
        .await;

    let service = RouteService::new(config_for_mock(&server.uri())).unwrap();
    let estimate = service
        .fare(FareInput {
            polyline: None,
            origin: Some("Sydney".to_string()),
            destination: Some("Macquarie Park".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(estimate, TollEstimate::zero());
}

#[tokio::test]
async fn test_timeout_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DIRECTIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(directions_ok())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = config_for_mock(&server.uri());
    config.timeout = std::time::Duration::from_millis(200);
    let service = RouteService::new(config).unwrap();

    let err = service.route("Sydney", "Macquarie Park").await.unwrap_err();
    assert!(matches!(err, RouteError::Http { .. }));
    assert!(!err.to_string().contains("google-test-key"));
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_coordinates_first_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", "Sydney"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                { "geometry": { "location": { "lat": -33.8, "lng": 151.2 } } },
                { "geometry": { "location": { "lat": 1.0, "lng": 1.0 } } }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("address", "Parramatta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{ "geometry": { "location": { "lat": -33.81, "lng": 151.0 } } }]
        })))
        .mount(&server)
        .await;

    let service = RouteService::new(config_for_mock(&server.uri())).unwrap();
    let pair = service.coordinates("Sydney", "Parramatta").await.unwrap();

    assert_eq!(
        pair.origin,
        Coordinate {
            latitude: -33.8,
            longitude: 151.2
        }
    );
    assert_eq!(
        pair.destination,
        Coordinate {
            latitude: -33.81,
            longitude: 151.0
        }
    );
}

#[tokio::test]
async fn test_coordinates_zero_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let service = RouteService::new(config_for_mock(&server.uri())).unwrap();
    let err = service.coordinates("Qwxz", "Sydney").await.unwrap_err();
    assert!(matches!(err, RouteError::Geocode { .. }));
}

#[tokio::test]
async fn test_coordinates_denied_is_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let service = RouteService::new(config_for_mock(&server.uri())).unwrap();
    let err = service.coordinates("Sydney", "Parramatta").await.unwrap_err();
    assert_eq!(err.kind(), tollway::ErrorKind::Upstream);
    match err {
        RouteError::Geocoding { status } => assert_eq!(status, "REQUEST_DENIED"),
        other => panic!("unexpected error: {other:?}"),
    }
}
