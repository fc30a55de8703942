//! Address to coordinate lookup via the Google Geocoding API.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Provider, Result, RouteError};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

/// Client for the Google Geocoding API.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    url: String,
    api_key: String,
}

impl Geocoder {
    pub fn new(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Resolve an address to the coordinate of its first result.
    ///
    /// `ZERO_RESULTS` and an empty result list are reported as
    /// [`RouteError::Geocode`]; any other non-`OK` status is
    /// [`RouteError::Geocoding`].
    pub async fn locate(&self, address: &str) -> Result<Coordinate> {
        if address.is_empty() {
            return Err(RouteError::MissingAddresses);
        }

        tracing::debug!(address, "Geocoding address");

        let response = self
            .client
            .get(&self.url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| RouteError::http(Provider::Geocoding, e))?;

        let body = response
            .text()
            .await
            .map_err(|e| RouteError::http(Provider::Geocoding, e))?;
        let geocoded: GeocodeResponse = serde_json::from_str(&body)
            .map_err(|e| RouteError::malformed(Provider::Geocoding, e))?;

        match geocoded.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            status => {
                tracing::warn!(address, status, "Geocoding request failed");
                return Err(RouteError::Geocoding {
                    status: status.to_string(),
                });
            }
        }

        let location = geocoded
            .results
            .first()
            .map(|result| &result.geometry.location)
            .ok_or_else(|| RouteError::Geocode {
                address: address.to_string(),
            })?;

        Ok(Coordinate {
            latitude: location.lat,
            longitude: location.lng,
        })
    }
}
