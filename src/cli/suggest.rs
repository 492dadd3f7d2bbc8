//! Suggest command handler
//!
//! Prints what the search box dropdown would show for partial input.

use crate::cli::{build_source, formatter};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::source::{SourceConfig, SuggestParams};
use clap::Args;

/// Suggest command arguments
#[derive(Args)]
pub struct SuggestArgs {
    /// Partial input, as typed so far
    pub text: String,

    /// View center latitude (defaults to view.lat)
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// View center longitude (defaults to view.lng)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Source index echoed back on each suggestion
    #[arg(long, default_value = "0")]
    pub source_index: usize,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the suggest command
pub async fn run(args: SuggestArgs, api_key: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let formatter = formatter(&args.format)?;
    let source = build_source(&config, api_key)?;

    let center = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
        _ => config.view_center(),
    };
    center.validate()?;

    if let Some(err) = refusal(source.info(), &args.text) {
        return Err(err);
    }

    let params = SuggestParams {
        partial_text: args.text,
        source_index: args.source_index,
        center,
    };
    let suggestions = source.get_suggestions(&params).await?;

    println!("{}", formatter.format_suggestions(&suggestions)?);
    Ok(())
}

/// Why `text` would get no suggestions, if it would not
fn refusal(info: &SourceConfig, text: &str) -> Option<Error> {
    if !info.suggestions_enabled {
        return Some(Error::InvalidQuery(
            "Suggestions are disabled in config (source.suggestions_enabled)".to_string(),
        ));
    }

    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().count() < info.min_suggest_characters {
        return Some(Error::InvalidQuery(format!(
            "Suggestions need at least {} non-blank characters",
            info.min_suggest_characters.max(1)
        )));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_disabled_reported_for_long_input() {
        let info = SourceConfig {
            suggestions_enabled: false,
            ..SourceConfig::default()
        };
        let message = refusal(&info, "Lancaster University").unwrap().to_string();
        assert!(message.contains("disabled"));
        assert!(!message.contains("at least"));
    }

    #[test]
    fn test_refusal_short_input() {
        let message = refusal(&SourceConfig::default(), "W1").unwrap().to_string();
        assert!(message.contains("at least 3"));
    }

    #[test]
    fn test_refusal_blank_with_zero_threshold() {
        let info = SourceConfig {
            min_suggest_characters: 0,
            ..SourceConfig::default()
        };
        assert!(refusal(&info, "   ").is_some());
        assert!(refusal(&info, "W").is_none());
    }

    #[test]
    fn test_no_refusal() {
        assert!(refusal(&SourceConfig::default(), "W10").is_none());
    }
}
