//! IP-based geolocation
//!
//! Uses ip-api.com to approximate the device position, which then goes
//! through the location path of the search source.

use crate::constants::api::IP_API_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An approximate device position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceLocation {
    pub coords: Coordinates,
    /// City, region and country as reported by the service
    pub display_name: String,
}

/// IP location service
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

impl IpLocator {
    /// Create a locator for ip-api.com
    pub fn new() -> Self {
        Self::with_url(IP_API_URL)
    }

    /// Create a locator against another ip-api compatible URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Get current location based on IP address
    pub async fn locate(&self) -> Result<DeviceLocation> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse IP location response: {}", e)))?;

        let location = Self::from_response(data)?;
        debug!(coords = %location.coords, name = %location.display_name, "Device location");
        Ok(location)
    }

    fn from_response(data: IpApiResponse) -> Result<DeviceLocation> {
        if data.status != "success" {
            return Err(Error::Geo("IP location lookup failed".to_string()));
        }

        let lat = data.lat.ok_or_else(|| Error::Geo("No latitude in response".to_string()))?;
        let lng = data.lon.ok_or_else(|| Error::Geo("No longitude in response".to_string()))?;
        let coords = Coordinates::new(lat, lng);
        coords.validate()?;

        let display_name = [data.city, data.region_name, data.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Ok(DeviceLocation {
            coords,
            display_name: if display_name.is_empty() {
                "Unknown Location".to_string()
            } else {
                display_name
            },
        })
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{Json, Router};
    use tokio::net::TcpListener;

    fn response(json: serde_json::Value) -> IpApiResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_from_response() {
        let location = IpLocator::from_response(response(serde_json::json!({
            "status": "success",
            "lat": 54.0466,
            "lon": -2.8007,
            "city": "Lancaster",
            "regionName": "England",
            "country": "United Kingdom"
        })))
        .unwrap();

        assert_eq!(location.coords, Coordinates::new(54.0466, -2.8007));
        assert_eq!(location.display_name, "Lancaster, England, United Kingdom");
    }

    #[test]
    fn test_from_response_without_names() {
        let location = IpLocator::from_response(response(serde_json::json!({
            "status": "success",
            "lat": 1.0,
            "lon": 2.0
        })))
        .unwrap();
        assert_eq!(location.display_name, "Unknown Location");
    }

    #[test]
    fn test_from_response_failure() {
        let err = IpLocator::from_response(response(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .unwrap_err();
        assert!(matches!(err, Error::Geo(_)));
    }

    #[tokio::test]
    async fn test_locate_against_local_service() {
        let app = Router::new().route(
            "/json",
            get(|| async {
                Json(serde_json::json!({
                    "status": "success",
                    "lat": 51.5074,
                    "lon": -0.1278,
                    "city": "London"
                }))
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let locator = IpLocator::with_url(format!("http://{}/json", addr));
        let location = locator.locate().await.unwrap();
        assert_eq!(location.coords, Coordinates::new(51.5074, -0.1278));
        assert_eq!(location.display_name, "London");
    }
}
