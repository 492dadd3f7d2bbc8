//! Server shared state
//!
//! Holds the search source and the default view for the HTTP server.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geocode::opencage::OpenCageClient;
use crate::geocode::Geocoder;
use crate::source::SearchSource;

/// Shared state for the HTTP server
pub struct AppState<G> {
    /// Search source answering widget requests
    pub source: SearchSource<G>,

    /// Center used when a suggestion request carries none
    pub default_center: Coordinates,

    /// Endpoint reported by the status route
    pub endpoint: String,
}

impl<G: Geocoder> AppState<G> {
    /// Create state around an existing geocoder
    pub fn new(geocoder: G, config: &Config) -> Self {
        Self {
            source: SearchSource::new(geocoder, config.source_config()),
            default_center: config.view_center(),
            endpoint: config.geocoder.endpoint.clone(),
        }
    }
}

impl AppState<OpenCageClient> {
    /// Create state backed by OpenCage
    pub fn from_config(config: &Config, api_key: &str) -> Result<Self> {
        let client = OpenCageClient::with_options(api_key, config.geocoder_options())?;
        Ok(Self::new(client, config))
    }
}
