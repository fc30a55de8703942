//! Error types for the tollway library.

use std::fmt;

use thiserror::Error;

/// Third-party API a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Directions,
    Tolls,
    Geocoding,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Directions => "directions",
            Provider::Tolls => "toll calculator",
            Provider::Geocoding => "geocoding",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while routing, pricing or geocoding a request.
#[derive(Error, Debug)]
pub enum RouteError {
    /// Origin or destination was missing or empty.
    #[error("Both origin and destination addresses are required")]
    MissingAddresses,

    /// `/get-fare` was called with neither a polyline nor an address pair.
    #[error("Either a polyline or both origin and destination addresses are required")]
    MissingFareInput,

    /// The directions provider answered with a status other than `OK`.
    #[error("Failed to retrieve directions")]
    Directions { status: String },

    /// The geocoding provider answered with a status other than `OK` or
    /// `ZERO_RESULTS`.
    #[error("Failed to geocode address (status {status})")]
    Geocoding { status: String },

    /// The toll provider answered with a non-200 status.
    #[error("Failed to retrieve toll cost (status {status}): {body}")]
    TollProvider { status: u16, body: String },

    /// Transport failure talking to a provider, including timeouts.
    #[error("Upstream {provider} request failed: {source}")]
    Http {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    /// A provider answered with a body we could not interpret.
    #[error("Malformed {provider} response: {detail}")]
    MalformedResponse { provider: Provider, detail: String },

    /// The geocoder found nothing for an address.
    #[error("No coordinates found for address: {address}")]
    Geocode { address: String },

    /// Toll pricing was requested but no toll credential is configured.
    #[error("Toll estimation is not configured")]
    TollsDisabled,

    /// Startup configuration was missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of [`RouteError`], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Upstream,
    Geocode,
    Unavailable,
    Config,
}

impl RouteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouteError::MissingAddresses | RouteError::MissingFareInput => ErrorKind::Validation,
            RouteError::Directions { .. }
            | RouteError::Geocoding { .. }
            | RouteError::TollProvider { .. }
            | RouteError::Http { .. }
            | RouteError::MalformedResponse { .. } => ErrorKind::Upstream,
            RouteError::Geocode { .. } => ErrorKind::Geocode,
            RouteError::TollsDisabled => ErrorKind::Unavailable,
            RouteError::Config(_) => ErrorKind::Config,
        }
    }

    /// The provider an upstream failure came from.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            RouteError::Directions { .. } => Some(Provider::Directions),
            RouteError::Geocoding { .. } => Some(Provider::Geocoding),
            RouteError::TollProvider { .. } => Some(Provider::Tolls),
            RouteError::Http { provider, .. } | RouteError::MalformedResponse { provider, .. } => {
                Some(*provider)
            }
            _ => None,
        }
    }

    /// Wrap a transport error. The URL is dropped because it carries the API key.
    pub fn http(provider: Provider, source: reqwest::Error) -> Self {
        RouteError::Http {
            provider,
            source: source.without_url(),
        }
    }

    pub fn malformed(provider: Provider, detail: impl fmt::Display) -> Self {
        RouteError::MalformedResponse {
            provider,
            detail: detail.to_string(),
        }
    }
}

/// Result type alias using [`RouteError`].
pub type Result<T> = std::result::Result<T, RouteError>;
