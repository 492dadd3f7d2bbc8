//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::source::resolve::SearchResult;
use crate::source::suggest::Suggestion;
use std::fmt::Write;

/// Text formatter - one numbered line per record
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format_suggestions(&self, suggestions: &[Suggestion]) -> Result<String> {
        if suggestions.is_empty() {
            return Ok("No suggestions".to_string());
        }

        let mut out = String::new();
        for (i, s) in suggestions.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} ({:.6}, {:.6})",
                i + 1,
                s.label,
                s.location.lat,
                s.location.lng
            );
        }
        Ok(out.trim_end().to_string())
    }

    fn format_results(&self, results: &[SearchResult]) -> Result<String> {
        if results.is_empty() {
            return Ok("No results".to_string());
        }

        let mut out = String::new();
        for (i, r) in results.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, r.name);
            let _ = writeln!(out, "   Point:  {:.6}, {:.6}", r.geometry.y, r.geometry.x);
            let _ = writeln!(
                out,
                "   Extent: {:.6}, {:.6} -> {:.6}, {:.6}",
                r.extent.ymin, r.extent.xmin, r.extent.ymax, r.extent.xmax
            );
        }
        Ok(out.trim_end().to_string())
    }
}
