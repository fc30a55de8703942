use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tollway::{RouteService, ServiceConfig, TollMode};

mod commands;

/// Driving route and NSW toll cost CLI tool
#[derive(Parser)]
#[command(name = "tollway")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Google Maps API key for directions and geocoding
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true, global = true)]
    google_key: Option<String>,

    /// Transport for NSW toll calculator key
    #[arg(long, env = "NSW_TOLL_API_KEY", hide_env_values = true, global = true)]
    toll_key: Option<String>,

    /// Outbound request timeout in seconds
    #[arg(long, env = "TOLLWAY_HTTP_TIMEOUT_SECS", default_value = "10", global = true)]
    timeout: u64,

    /// Output result as JSON
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the driving route between two addresses
    Route {
        origin: String,
        destination: String,

        /// Also estimate the toll cost
        #[arg(short, long)]
        tolls: bool,

        /// Include per-step polylines in JSON output
        #[arg(short, long)]
        steps: bool,
    },

    /// Estimate the toll cost of a polyline or of a route
    Fare {
        /// Encoded polyline to price
        #[arg(long, conflicts_with_all = ["origin", "destination"])]
        polyline: Option<String>,

        #[arg(long, requires = "destination")]
        origin: Option<String>,

        #[arg(long, requires = "origin")]
        destination: Option<String>,
    },

    /// Geocode two addresses
    Coords { origin: String, destination: String },
}

impl Cli {
    fn service(&self, toll_mode: TollMode, steps: bool) -> Result<RouteService> {
        let google_key = self
            .google_key
            .clone()
            .context("GOOGLE_MAPS_API_KEY not set. Use --google-key or set GOOGLE_MAPS_API_KEY")?;

        let mut config = ServiceConfig::new(google_key).toll_mode(toll_mode);
        config.toll_api_key = self.toll_key.clone();
        config.include_step_polylines = steps;
        config.timeout = std::time::Duration::from_secs(self.timeout);

        RouteService::new(config).context("Failed to create route service")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Route {
            origin,
            destination,
            tolls,
            steps,
        } => {
            let mode = if *tolls { TollMode::Cost } else { TollMode::None };
            let service = cli.service(mode, *steps)?;
            commands::route::run(&service, origin, destination, cli.json).await
        }
        Commands::Fare {
            polyline,
            origin,
            destination,
        } => {
            let service = cli.service(TollMode::None, false)?;
            commands::fare::run(
                &service,
                polyline.clone(),
                origin.clone(),
                destination.clone(),
                cli.json,
            )
            .await
        }
        Commands::Coords {
            origin,
            destination,
        } => {
            let service = cli.service(TollMode::None, false)?;
            commands::coords::run(&service, origin, destination, cli.json).await
        }
    }
}
