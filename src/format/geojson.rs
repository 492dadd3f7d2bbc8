//! GeoJSON output formatter
//!
//! Emits a FeatureCollection of points. Results carry their extent as the
//! feature `bbox` so a map client can frame them directly.

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::source::resolve::SearchResult;
use crate::source::suggest::Suggestion;
use serde_json::{json, Value};

/// GeoJSON formatter
pub struct GeoJsonFormatter;

fn collection(features: Vec<Value>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&json!({
        "type": "FeatureCollection",
        "features": features,
    }))?)
}

impl OutputFormatter for GeoJsonFormatter {
    fn name(&self) -> &str {
        "geojson"
    }

    fn description(&self) -> &str {
        "GeoJSON FeatureCollection of points"
    }

    fn format_suggestions(&self, suggestions: &[Suggestion]) -> Result<String> {
        let features = suggestions
            .iter()
            .map(|s| {
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": [s.location.lng, s.location.lat],
                    },
                    "properties": {
                        "label": s.label,
                        "source_index": s.source_index,
                    },
                })
            })
            .collect();
        collection(features)
    }

    fn format_results(&self, results: &[SearchResult]) -> Result<String> {
        let features = results
            .iter()
            .map(|r| {
                let mut properties = r.attributes.properties.clone();
                properties.insert("name".to_string(), json!(r.attributes.name));
                properties.insert("label".to_string(), json!(r.attributes.label));

                json!({
                    "type": "Feature",
                    "bbox": [r.extent.xmin, r.extent.ymin, r.extent.xmax, r.extent.ymax],
                    "geometry": {
                        "type": "Point",
                        "coordinates": [r.geometry.x, r.geometry.y],
                    },
                    "properties": properties,
                })
            })
            .collect();
        collection(features)
    }
}
