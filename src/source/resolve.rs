//! Final results
//!
//! Resolves a committed query, either a chosen suggestion's text or a raw
//! location, into results carrying a point geometry and a framing extent.

use crate::constants::search::BUFFER_RADIUS_METERS;
use crate::coord::buffer::geodesic_buffer;
use crate::coord::{BoundingBox, Coordinates, Point};
use crate::error::Result;
use crate::geocode::{normalize_query, GeocodeFeature, GeocodeQuery, Geocoder};
use serde::{Deserialize, Serialize};

/// Options for building results
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveOptions {
    /// Radius of the buffer whose extent frames each result
    pub buffer_radius_meters: f64,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            buffer_radius_meters: BUFFER_RADIUS_METERS,
        }
    }
}

/// Attributes attached to a result graphic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultAttributes {
    pub name: String,
    pub label: String,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// A located, display-ready result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub geometry: Point,
    pub extent: BoundingBox,
    pub attributes: ResultAttributes,
}

/// Build a result from one feature
pub fn build_result(feature: GeocodeFeature, options: &ResolveOptions) -> Result<SearchResult> {
    let center = feature.coordinates();
    let extent = geodesic_buffer(center, options.buffer_radius_meters)?.extent();

    Ok(SearchResult {
        name: feature.formatted_label.clone(),
        geometry: center.to_point(),
        extent,
        attributes: ResultAttributes {
            name: feature.formatted_label.clone(),
            label: feature.formatted_label,
            properties: feature.properties,
        },
    })
}

/// Resolve a raw location; the query is the `"lat,lon"` string itself
pub async fn resolve_from_location<G: Geocoder>(
    geocoder: &G,
    location: Coordinates,
    options: &ResolveOptions,
) -> Result<Vec<SearchResult>> {
    location.validate()?;
    let query = GeocodeQuery::new(location.to_string())?;
    resolve(geocoder, &query, options).await
}

/// Resolve committed text, such as a chosen suggestion's label
pub async fn resolve_from_text<G: Geocoder>(
    geocoder: &G,
    text: &str,
    options: &ResolveOptions,
) -> Result<Vec<SearchResult>> {
    let query = GeocodeQuery::new(normalize_query(text))?;
    resolve(geocoder, &query, options).await
}

async fn resolve<G: Geocoder>(
    geocoder: &G,
    query: &GeocodeQuery,
    options: &ResolveOptions,
) -> Result<Vec<SearchResult>> {
    geocoder
        .geocode(query)
        .await?
        .into_iter()
        .map(|feature| build_result(feature, options))
        .collect()
}
