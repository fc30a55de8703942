//! Toll cost estimation via the Transport for NSW toll calculator.
//!
//! The calculator matches an encoded polyline against the Sydney motorway
//! network and returns a charge for every toll point the route passes. The
//! charges are summed into a single [`TollEstimate`] in Australian dollars.
//!
//! A response without a match, or with no charges, is a toll-free route and
//! yields a zero estimate rather than an error.

use chrono::{Local, SecondsFormat};
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{Provider, Result, RouteError};

/// Currency of every estimate.
pub const CURRENCY: &str = "AUD";

/// Vehicle class sent for the route as a whole.
pub const VEHICLE_CLASS: &str = "A";

/// Vehicle class applied on each known motorway.
pub const MOTORWAY_VEHICLE_CLASSES: [(&str, &str); 10] = [
    ("CCT", "A"),
    ("ED", "A"),
    ("LCT", "A"),
    ("M2", "A"),
    ("M4", "A"),
    ("M5", "A"),
    ("M6", "A"),
    ("M7", "A"),
    ("SHB", "A"),
    ("SHT", "A"),
];

/// Matching accuracy requested from the calculator, in meters.
const MATCH_ACCURACY: u32 = 10;

/// Aggregate toll cost of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TollEstimate {
    pub toll_cost: f64,
    pub currency: &'static str,
}

impl TollEstimate {
    pub fn from_cents(cents: u64) -> Self {
        Self {
            toll_cost: cents as f64 / 100.0,
            currency: CURRENCY,
        }
    }

    pub fn zero() -> Self {
        Self::from_cents(0)
    }
}

/// Request body for the calculator's `match` endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TollRequest<'a> {
    pub accuracy: u32,
    pub departure_time: String,
    pub include_steps: bool,
    pub polyline: &'a str,
    pub vehicle_class: &'static str,
    pub vehicle_class_by_motorway: serde_json::Map<String, serde_json::Value>,
}

impl<'a> TollRequest<'a> {
    pub fn new(polyline: &'a str, departure_time: String) -> Self {
        let vehicle_class_by_motorway = MOTORWAY_VEHICLE_CLASSES
            .iter()
            .map(|(motorway, class)| (motorway.to_string(), (*class).into()))
            .collect();

        Self {
            accuracy: MATCH_ACCURACY,
            departure_time,
            include_steps: false,
            polyline,
            vehicle_class: VEHICLE_CLASS,
            vehicle_class_by_motorway,
        }
    }
}

/// Subset of the calculator response that carries prices.
#[derive(Debug, Default, Deserialize)]
pub struct TollResponse {
    #[serde(rename = "match", default)]
    pub matched: Option<TollMatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TollMatch {
    #[serde(default)]
    pub tolls_charged: Vec<TollPoint>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TollPoint {
    #[serde(default)]
    pub charges: Vec<Charge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub charge_in_cents: u64,
}

/// Sum every charge of every toll point.
pub fn total_cost(response: &TollResponse) -> TollEstimate {
    let cents = response
        .matched
        .iter()
        .flat_map(|m| m.tolls_charged.iter())
        .flat_map(|point| point.charges.iter())
        .map(|charge| charge.charge_in_cents)
        .sum();
    TollEstimate::from_cents(cents)
}

/// Client for the toll calculator.
#[derive(Debug, Clone)]
pub struct TollEstimator {
    client: Client,
    url: String,
    api_key: String,
}

impl TollEstimator {
    pub fn new(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Estimate the toll cost of travelling along `polyline` now.
    ///
    /// # Errors
    ///
    /// - [`RouteError::TollProvider`] with the raw body on a non-200 status
    /// - [`RouteError::Http`] or [`RouteError::MalformedResponse`] on transport
    ///   or decoding failures
    pub async fn estimate(&self, polyline: &str) -> Result<TollEstimate> {
        let departure_time = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        let request = TollRequest::new(polyline, departure_time);

        tracing::debug!(
            polyline_len = polyline.len(),
            departure_time = %request.departure_time,
            "Requesting toll estimate"
        );

        let response = self
            .client
            .post(&self.url)
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, format!("apikey {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| RouteError::http(Provider::Tolls, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RouteError::http(Provider::Tolls, e))?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), body = %body, "Toll calculator rejected request");
            return Err(RouteError::TollProvider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TollResponse = serde_json::from_str(&body)
            .map_err(|e| RouteError::malformed(Provider::Tolls, e))?;

        let estimate = total_cost(&parsed);
        tracing::info!(
            matched = parsed.matched.is_some(),
            toll_cost = estimate.toll_cost,
            "Toll estimate computed"
        );
        Ok(estimate)
    }
}
