use anyhow::{Context, Result};
use serde::Serialize;
use tollway::{RouteService, RouteTolls};

#[derive(Serialize)]
struct RouteOutput<'a> {
    overview_polyline: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detailed_route_points: Option<&'a [String]>,
    total_distance_m: u64,
    total_duration_s: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    toll_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
}

pub async fn run(service: &RouteService, origin: &str, destination: &str, json: bool) -> Result<()> {
    let response = service
        .route(origin, destination)
        .await
        .with_context(|| format!("Failed to route {origin} -> {destination}"))?;

    let summary = &response.summary;
    let estimate = match &response.tolls {
        Some(RouteTolls::Cost(estimate)) => Some(estimate),
        _ => None,
    };

    if json {
        let output = RouteOutput {
            overview_polyline: &summary.overview_polyline,
            detailed_route_points: response
                .include_step_polylines
                .then_some(summary.step_polylines.as_slice()),
            total_distance_m: summary.total_distance_m,
            total_duration_s: summary.total_duration_s,
            toll_cost: estimate.map(|e| e.toll_cost),
            currency: estimate.map(|e| e.currency),
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!(
        "{:.1} km, {} min",
        summary.total_distance_m as f64 / 1000.0,
        summary.total_duration_s.div_ceil(60)
    );
    if let Some(estimate) = estimate {
        println!("tolls: {:.2} {}", estimate.toll_cost, estimate.currency);
    }
    println!("{}", summary.overview_polyline);

    Ok(())
}
