//! Suggestions for partial input
//!
//! Maps provider candidates 1:1, in provider order, into lightweight records
//! for a dropdown. The query is biased towards the current view center.

use crate::coord::Coordinates;
use crate::error::Result;
use crate::geocode::{normalize_query, GeocodeQuery, Geocoder};
use serde::{Deserialize, Serialize};

/// A dropdown entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub location: Coordinates,
    /// Index of the host-configured source that produced this entry
    pub source_index: usize,
}

/// Fetch suggestions for `partial_text` near `center`
///
/// Issues exactly one geocoder call. Provider errors are returned as-is.
pub async fn suggest<G: Geocoder>(
    geocoder: &G,
    partial_text: &str,
    center: Coordinates,
    source_index: usize,
) -> Result<Vec<Suggestion>> {
    let query = GeocodeQuery::new(normalize_query(partial_text))?.with_proximity(center)?;
    let features = geocoder.geocode(&query).await?;

    Ok(features
        .into_iter()
        .map(|feature| Suggestion {
            location: feature.coordinates(),
            label: feature.formatted_label,
            source_index,
        })
        .collect())
}
