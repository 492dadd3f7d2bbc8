//! Search source
//!
//! The capability a map search widget plugs in as one of its sources: a few
//! display settings plus two operations, `get_suggestions` while the user
//! types and `get_results` once a query is committed. Each call is an
//! independent request/response exchange against the geocoder.

pub mod resolve;
pub mod sequence;
pub mod suggest;

use crate::coord::Coordinates;
use crate::error::Result;
use crate::geocode::Geocoder;
use resolve::{resolve_from_location, resolve_from_text, ResolveOptions, SearchResult};
use sequence::RequestSequence;
use serde::{Deserialize, Serialize};
use suggest::{suggest, Suggestion};
use tracing::debug;

/// Settings the host widget reads from the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub placeholder: String,
    pub suggestions_enabled: bool,
    /// Inputs shorter than this never reach the geocoder
    pub min_suggest_characters: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            placeholder: crate::config::defaults::DEFAULT_PLACEHOLDER.to_string(),
            suggestions_enabled: true,
            min_suggest_characters: crate::config::defaults::DEFAULT_MIN_SUGGEST_CHARACTERS,
        }
    }
}

/// Input for `get_suggestions`
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestParams {
    pub partial_text: String,
    pub source_index: usize,
    /// Current map view center, used as proximity bias
    pub center: Coordinates,
}

/// Input for `get_results`
#[derive(Debug, Clone, PartialEq)]
pub enum ResultParams {
    /// Device position or a point selected on the map
    Location(Coordinates),
    /// Text of the chosen suggestion, or the raw committed input
    Text { chosen_suggestion_text: String },
}

/// A geocoder exposed as a search source
#[derive(Debug)]
pub struct SearchSource<G> {
    geocoder: G,
    config: SourceConfig,
    resolve_options: ResolveOptions,
}

impl<G: Geocoder> SearchSource<G> {
    /// Create a source with default resolve options
    pub fn new(geocoder: G, config: SourceConfig) -> Self {
        Self::with_options(geocoder, config, ResolveOptions::default())
    }

    pub fn with_options(geocoder: G, config: SourceConfig, resolve_options: ResolveOptions) -> Self {
        Self {
            geocoder,
            config,
            resolve_options,
        }
    }

    pub fn info(&self) -> &SourceConfig {
        &self.config
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Whether `partial_text` is long enough to be worth a request
    ///
    /// Blank input never qualifies, even with a threshold of zero.
    pub fn should_suggest(&self, partial_text: &str) -> bool {
        let trimmed = partial_text.trim();
        self.config.suggestions_enabled
            && !trimmed.is_empty()
            && trimmed.chars().count() >= self.config.min_suggest_characters
    }

    /// Suggestions for partial input
    ///
    /// Returns an empty list without touching the geocoder when suggestions
    /// are disabled or the input is below `min_suggest_characters`.
    pub async fn get_suggestions(&self, params: &SuggestParams) -> Result<Vec<Suggestion>> {
        if !self.should_suggest(&params.partial_text) {
            debug!(
                len = params.partial_text.chars().count(),
                min = self.config.min_suggest_characters,
                "Skipping suggestions"
            );
            return Ok(Vec::new());
        }

        suggest(
            &self.geocoder,
            &params.partial_text,
            params.center,
            params.source_index,
        )
        .await
    }

    /// Like `get_suggestions`, but yields `None` if a newer request was
    /// issued on `sequence` before this one completed
    pub async fn get_latest_suggestions(
        &self,
        sequence: &RequestSequence,
        params: &SuggestParams,
    ) -> Result<Option<Vec<Suggestion>>> {
        let ticket = sequence.next();
        let outcome = self.get_suggestions(params).await;

        // A superseded request is dropped whether it succeeded or failed
        if !sequence.is_latest(ticket) {
            debug!(?ticket, failed = outcome.is_err(), "Discarding stale suggestions");
            return Ok(None);
        }
        outcome.map(Some)
    }

    /// Final results for a committed query
    pub async fn get_results(&self, params: &ResultParams) -> Result<Vec<SearchResult>> {
        match params {
            ResultParams::Location(location) => {
                resolve_from_location(&self.geocoder, *location, &self.resolve_options).await
            }
            ResultParams::Text {
                chosen_suggestion_text,
            } => resolve_from_text(&self.geocoder, chosen_suggestion_text, &self.resolve_options).await,
        }
    }
}
