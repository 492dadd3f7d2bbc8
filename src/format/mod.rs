//! Output formatters
//!
//! Provides trait-based output formatting for suggestions and results.

pub mod geojson;
pub mod json;
pub mod text;

use crate::error::Result;
use crate::source::resolve::SearchResult;
use crate::source::suggest::Suggestion;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a suggestion list
    fn format_suggestions(&self, suggestions: &[Suggestion]) -> Result<String>;

    /// Format resolved results
    fn format_results(&self, results: &[SearchResult]) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "geojson" => Some(Box::new(geojson::GeoJsonFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        &json::JsonFormatter as &dyn OutputFormatter,
        &text::TextFormatter,
        &geojson::GeoJsonFormatter,
    ]
    .iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("geojson").is_some());
        assert!(get_formatter("gpx").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("GeoJSON").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 3);
        for info in &formats {
            assert!(get_formatter(&info.name).is_some());
            assert!(!info.description.is_empty());
        }
    }
}
