//! Startup configuration.
//!
//! [`ServiceConfig`] is read once when the process starts and passed into
//! [`RouteService`](crate::RouteService). Nothing in the library reads the
//! environment after that point.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `GOOGLE_MAPS_API_KEY` | Directions and geocoding API key | Required |
//! | `NSW_TOLL_API_KEY` | Toll calculator credential | None |
//! | `PORT` | HTTP server port | 5000 |
//! | `HOST` | HTTP bind address | 0.0.0.0 |
//! | `TOLLWAY_TOLL_MODE` | `none`, `flag` or `cost` | none |
//! | `TOLLWAY_STEP_POLYLINES` | Include per-step polylines | true |
//! | `TOLLWAY_HTTP_TIMEOUT_SECS` | Outbound request timeout | 10 |
//! | `TOLLWAY_DIRECTIONS_URL` | Directions endpoint | Google Directions |
//! | `TOLLWAY_GEOCODE_URL` | Geocoding endpoint | Google Geocoding |
//! | `TOLLWAY_TOLL_URL` | Toll calculator endpoint | NSW toll_calc match |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, RouteError};

/// Default Google Directions endpoint.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Default Google Geocoding endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Default Transport for NSW toll calculator endpoint.
pub const DEFAULT_TOLL_URL: &str = "https://api.transport.nsw.gov.au/v2/roads/toll_calc/match";

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default timeout for outbound provider requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which toll information a route response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TollMode {
    /// No toll fields.
    #[default]
    None,
    /// A `tolls` boolean derived from the directions response.
    Flag,
    /// A priced estimate from the toll calculator.
    Cost,
}

impl FromStr for TollMode {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "off" => Ok(TollMode::None),
            "flag" => Ok(TollMode::Flag),
            "cost" => Ok(TollMode::Cost),
            other => Err(RouteError::Config(format!(
                "unknown toll mode {other:?} (expected none, flag or cost)"
            ))),
        }
    }
}

impl fmt::Display for TollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TollMode::None => "none",
            TollMode::Flag => "flag",
            TollMode::Cost => "cost",
        };
        f.write_str(name)
    }
}

/// Configuration for [`RouteService`](crate::RouteService) and the HTTP server.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Google Maps API key used for directions and geocoding.
    pub directions_api_key: String,
    /// Toll calculator credential. Toll pricing is unavailable without it.
    pub toll_api_key: Option<String>,
    /// Which toll fields `/get-route` includes.
    pub toll_mode: TollMode,
    /// Whether `/get-route` includes per-step polylines.
    pub include_step_polylines: bool,
    /// Timeout applied to every outbound request.
    pub timeout: Duration,
    pub directions_url: String,
    pub geocode_url: String,
    pub toll_url: String,
    pub host: String,
    pub port: u16,
}

// Keys stay out of logs.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("directions_api_key", &"<redacted>")
            .field(
                "toll_api_key",
                &self.toll_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("toll_mode", &self.toll_mode)
            .field("include_step_polylines", &self.include_step_polylines)
            .field("timeout", &self.timeout)
            .field("directions_url", &self.directions_url)
            .field("geocode_url", &self.geocode_url)
            .field("toll_url", &self.toll_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl ServiceConfig {
    /// Create a configuration with default endpoints and no toll pricing.
    pub fn new(directions_api_key: impl Into<String>) -> Self {
        Self {
            directions_api_key: directions_api_key.into(),
            toll_api_key: None,
            toll_mode: TollMode::None,
            include_step_polylines: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            toll_url: DEFAULT_TOLL_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Set the toll calculator credential.
    pub fn toll_api_key(mut self, key: impl Into<String>) -> Self {
        self.toll_api_key = Some(key.into());
        self
    }

    /// Set the toll mode.
    pub fn toll_mode(mut self, mode: TollMode) -> Self {
        self.toll_mode = mode;
        self
    }

    /// Read configuration from environment variables.
    ///
    /// See the module documentation for the recognised variables.
    pub fn from_env() -> Result<Self> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let directions_api_key = get("GOOGLE_MAPS_API_KEY").ok_or_else(|| {
            RouteError::Config("GOOGLE_MAPS_API_KEY environment variable not set".to_string())
        })?;

        let mut config = Self::new(directions_api_key);
        config.toll_api_key = get("NSW_TOLL_API_KEY");

        if let Some(mode) = get("TOLLWAY_TOLL_MODE") {
            config.toll_mode = mode.parse()?;
        }

        if let Some(value) = get("TOLLWAY_STEP_POLYLINES") {
            config.include_step_polylines = parse_bool("TOLLWAY_STEP_POLYLINES", &value)?;
        }

        if let Some(value) = get("TOLLWAY_HTTP_TIMEOUT_SECS") {
            let secs: u64 = value.trim().parse().map_err(|_| {
                RouteError::Config(format!("TOLLWAY_HTTP_TIMEOUT_SECS is not a number: {value}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(url) = get("TOLLWAY_DIRECTIONS_URL") {
            config.directions_url = url;
        }
        if let Some(url) = get("TOLLWAY_GEOCODE_URL") {
            config.geocode_url = url;
        }
        if let Some(url) = get("TOLLWAY_TOLL_URL") {
            config.toll_url = url;
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| RouteError::Config(format!("PORT is not a valid port: {port}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check combinations that individual fields cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.directions_api_key.trim().is_empty() {
            return Err(RouteError::Config(
                "directions API key must not be empty".to_string(),
            ));
        }
        if self.toll_mode == TollMode::Cost && self.toll_api_key.is_none() {
            return Err(RouteError::Config(
                "TOLLWAY_TOLL_MODE=cost requires NSW_TOLL_API_KEY".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(RouteError::Config(format!(
            "{name} must be true or false, got {value:?}"
        ))),
    }
}
