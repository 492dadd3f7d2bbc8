//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::source::resolve::SearchResult;
use crate::source::suggest::Suggestion;

/// JSON formatter - outputs records as pretty-printed JSON arrays
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Records as a JSON array"
    }

    fn format_suggestions(&self, suggestions: &[Suggestion]) -> Result<String> {
        Ok(serde_json::to_string_pretty(suggestions)?)
    }

    fn format_results(&self, results: &[SearchResult]) -> Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }
}
