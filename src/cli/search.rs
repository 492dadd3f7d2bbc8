//! Search command handler
//!
//! Resolves committed text, explicit coordinates, or the device location
//! into results with a framing extent.

use crate::cli::{build_source, formatter};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::get_ip_locator;
use crate::source::ResultParams;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Place name, address, or chosen suggestion text
    #[arg(conflicts_with_all = ["lat", "lng", "here"])]
    pub text: Option<String>,

    /// Latitude of a selected point
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of a selected point
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the search command
pub async fn run(args: SearchArgs, api_key: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let formatter = formatter(&args.format)?;
    let source = build_source(&config, api_key)?;

    let params = if args.here {
        let location = get_ip_locator().locate().await?;
        eprintln!("Using current location: {}", location.display_name);
        ResultParams::Location(location.coords)
    } else if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        ResultParams::Location(Coordinates::new(lat, lng))
    } else if let Some(text) = args.text {
        ResultParams::Text {
            chosen_suggestion_text: text,
        }
    } else {
        return Err(Error::InvalidQuery(
            "Provide search text, --lat/--lng, or --here".to_string(),
        ));
    };

    let results = source.get_results(&params).await?;
    println!("{}", formatter.format_results(&results)?);
    Ok(())
}
