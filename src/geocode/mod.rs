//! Forward geocoding
//!
//! Defines the `Geocoder` trait the search source talks to, the normalized
//! query and feature types, and the OpenCage implementation.

pub mod opencage;

use crate::constants::search::QUERY_SEPARATOR;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single forward-geocoding request
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeQuery {
    text: String,
    proximity: Option<Coordinates>,
}

impl GeocodeQuery {
    /// Create a query; `text` must contain something other than whitespace
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::InvalidQuery("Query text is empty".to_string()));
        }
        Ok(Self {
            text,
            proximity: None,
        })
    }

    /// Bias ranking towards `center`
    pub fn with_proximity(mut self, center: Coordinates) -> Result<Self> {
        center.validate()?;
        self.proximity = Some(center);
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn proximity(&self) -> Option<Coordinates> {
        self.proximity
    }
}

/// One candidate returned by the provider, in provider rank order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeFeature {
    /// Provider-formatted display label
    pub formatted_label: String,
    pub lat: f64,
    pub lng: f64,
    /// Free-form provider metadata, passed through untouched
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl GeocodeFeature {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Trait for forward-geocoding backends
pub trait Geocoder: Send + Sync {
    /// Short backend name, for logs and status output
    fn name(&self) -> &str;

    /// Geocode a query into ranked candidate features
    ///
    /// Zero candidates is `Ok(vec![])`, never an error.
    fn geocode(
        &self,
        query: &GeocodeQuery,
    ) -> impl std::future::Future<Output = Result<Vec<GeocodeFeature>>> + Send;
}

/// Join the whitespace-separated words of `text` with the provider separator
///
/// Leading and trailing whitespace is dropped, and each run of whitespace
/// (spaces, tabs, newlines) collapses to a single `+`, so
/// `" Leeds  Bradford airport "` becomes `"Leeds+Bradford+airport"` rather
/// than one `+` per space.
pub fn normalize_query(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(QUERY_SEPARATOR)
}
