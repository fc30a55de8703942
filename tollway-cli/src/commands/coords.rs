use anyhow::{Context, Result};
use serde::Serialize;
use tollway::{Coordinate, RouteService};

#[derive(Serialize)]
struct CoordinatesOutput {
    origin: Coordinate,
    destination: Coordinate,
}

pub async fn run(service: &RouteService, origin: &str, destination: &str, json: bool) -> Result<()> {
    let pair = service
        .coordinates(origin, destination)
        .await
        .context("Failed to geocode addresses")?;

    if json {
        let output = CoordinatesOutput {
            origin: pair.origin,
            destination: pair.destination,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "origin:      {:.6}, {:.6}",
            pair.origin.latitude, pair.origin.longitude
        );
        println!(
            "destination: {:.6}, {:.6}",
            pair.destination.latitude, pair.destination.longitude
        );
    }

    Ok(())
}
