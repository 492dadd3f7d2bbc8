//! opencage-search: OpenCage search source for map widgets
//!
//! Resolves free-text or coordinate queries through the OpenCage
//! forward-geocoding API for a map search box.
//!
//! ## Features
//!
//! - Suggestions while typing, biased towards the current view center
//! - Final results with point geometry and a 250 m geodesic-buffer extent
//! - Optional latest-request tagging to drop stale suggestions
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use opencage_search::coord::Coordinates;
//! use opencage_search::geocode::opencage::OpenCageClient;
//! use opencage_search::source::{ResultParams, SearchSource, SourceConfig, SuggestParams};
//!
//! # async fn demo() -> opencage_search::Result<()> {
//! let client = OpenCageClient::new("YOUR-API-KEY")?;
//! let source = SearchSource::new(client, SourceConfig::default());
//!
//! let suggestions = source
//!     .get_suggestions(&SuggestParams {
//!         partial_text: "Lancas".to_string(),
//!         source_index: 0,
//!         center: Coordinates::new(54.00366, -2.547855),
//!     })
//!     .await?;
//!
//! let results = source
//!     .get_results(&ResultParams::Text {
//!         chosen_suggestion_text: suggestions[0].label.clone(),
//!     })
//!     .await?;
//! println!("{:?}", results[0].extent);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod geocode;
pub mod server;
pub mod source;

// Re-export commonly used types
pub use config::Config;
pub use coord::{BoundingBox, Coordinates, Point};
pub use error::{Error, Result};
pub use geocode::{GeocodeFeature, GeocodeQuery, Geocoder};
pub use source::resolve::SearchResult;
pub use source::suggest::Suggestion;
pub use source::{ResultParams, SearchSource, SourceConfig, SuggestParams};
