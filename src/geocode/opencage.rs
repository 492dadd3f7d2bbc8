//! OpenCage geocoding backend
//!
//! API documentation: https://opencagedata.com/api
//!
//! Every request carries the API key, the query text, an optional proximity
//! bias, `no_annotations=1` and a fixed result limit. Auth failures are
//! reported by HTTP status (401 invalid key, 403 disabled key).

use crate::constants::api::OPENCAGE_URL;
use crate::constants::search::RESULT_LIMIT;
use crate::error::{Error, Result};
use crate::geocode::{GeocodeFeature, GeocodeQuery, Geocoder};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("opencage-search/", env!("CARGO_PKG_VERSION"));

/// Fixed request parameters, kept out of process-wide state
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderOptions {
    /// Endpoint URL
    pub endpoint: String,
    /// Maximum candidates per request
    pub limit: u32,
    /// Ask the provider to omit annotations
    pub no_annotations: bool,
}

impl Default for GeocoderOptions {
    fn default() -> Self {
        Self {
            endpoint: OPENCAGE_URL.to_string(),
            limit: RESULT_LIMIT,
            no_annotations: true,
        }
    }
}

/// OpenCage forward-geocoding client
#[derive(Debug, Clone)]
pub struct OpenCageClient {
    client: reqwest::Client,
    api_key: String,
    options: GeocoderOptions,
}

/// Top-level response body
#[derive(Debug, Deserialize)]
struct OpenCageResponse {
    results: Option<Vec<OpenCageResult>>,
    #[serde(default)]
    status: Option<OpenCageStatus>,
    #[serde(default)]
    rate: Option<OpenCageRate>,
    #[serde(default)]
    total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct OpenCageResult {
    formatted: String,
    geometry: OpenCageGeometry,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OpenCageGeometry {
    lat: f64,
    lng: f64,
}

/// `{"code": 401, "message": "invalid API key"}`
///
/// Either field may be missing; neither is needed to read `results`.
#[derive(Debug, Deserialize)]
struct OpenCageStatus {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

/// Quota information, only present on free-trial keys
#[derive(Debug, Deserialize)]
struct OpenCageRate {
    #[serde(default)]
    limit: Option<u64>,
    #[serde(default)]
    remaining: Option<u64>,
    #[serde(default)]
    reset: Option<u64>,
}

/// Body of an error response; only the status block is of interest
#[derive(Debug, Deserialize)]
struct OpenCageErrorBody {
    status: OpenCageStatus,
}

impl OpenCageClient {
    /// Create a client for the default endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, GeocoderOptions::default())
    }

    /// Create a client with explicit request options
    pub fn with_options(api_key: impl Into<String>, options: GeocoderOptions) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Auth(
                "No API key configured (set api_key or OPENCAGE_API_KEY)".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            options,
        })
    }

    pub fn options(&self) -> &GeocoderOptions {
        &self.options
    }

    /// Query string pairs for a request, key first
    fn query_params(&self, query: &GeocodeQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("q", query.text().to_string()),
        ];
        if let Some(center) = query.proximity() {
            params.push(("proximity", center.to_string()));
        }
        if self.options.no_annotations {
            params.push(("no_annotations", "1".to_string()));
        }
        params.push(("limit", self.options.limit.to_string()));
        params
    }

    /// Message from an error body, or the canonical status text
    fn error_message(status: StatusCode, body: &str) -> String {
        serde_json::from_str::<OpenCageErrorBody>(body)
            .ok()
            .and_then(|b| b.status.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            })
    }

    /// Turn a response status and body into features
    fn parse_response(status: StatusCode, body: &str) -> Result<Vec<GeocodeFeature>> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Auth(Self::error_message(status, body)));
        }
        if !status.is_success() {
            let message = Self::error_message(status, body);
            warn!(status = status.as_u16(), %message, "OpenCage returned an error status");
            return Err(Error::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let response: OpenCageResponse = serde_json::from_str(body).map_err(|e| {
            Error::MalformedResponse(format!("Failed to parse OpenCage response: {}", e))
        })?;

        if let Some(code @ (401 | 403)) = response.status.as_ref().and_then(|s| s.code) {
            let message = response
                .status
                .and_then(|s| s.message)
                .unwrap_or_else(|| format!("provider status {}", code));
            return Err(Error::Auth(message));
        }
        if let Some(rate) = &response.rate {
            debug!(
                limit = rate.limit,
                remaining = rate.remaining,
                reset = rate.reset,
                "OpenCage rate limit"
            );
        }

        let results = response.results.ok_or_else(|| {
            Error::MalformedResponse("Response has no `results` field".to_string())
        })?;
        debug!(
            returned = results.len(),
            total = response.total_results,
            "OpenCage results"
        );

        Ok(results
            .into_iter()
            .map(|r| GeocodeFeature {
                formatted_label: r.formatted,
                lat: r.geometry.lat,
                lng: r.geometry.lng,
                properties: r.properties,
            })
            .collect())
    }
}

impl Geocoder for OpenCageClient {
    fn name(&self) -> &str {
        "opencage"
    }

    async fn geocode(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeFeature>> {
        debug!(
            q = query.text(),
            proximity = ?query.proximity(),
            "OpenCage request"
        );

        let response = self
            .client
            .get(&self.options.endpoint)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| Error::Network(format!("OpenCage request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read OpenCage response: {}", e)))?;

        Self::parse_response(status, &body)
    }
}
