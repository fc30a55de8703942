use anyhow::{Context, Result};
use tollway::{FareInput, RouteService};

pub async fn run(
    service: &RouteService,
    polyline: Option<String>,
    origin: Option<String>,
    destination: Option<String>,
    json: bool,
) -> Result<()> {
    let estimate = service
        .fare(FareInput {
            polyline,
            origin,
            destination,
        })
        .await
        .context("Failed to estimate toll cost")?;

    if json {
        println!("{}", serde_json::to_string(&estimate)?);
    } else {
        println!("{:.2} {}", estimate.toll_cost, estimate.currency);
    }

    Ok(())
}
