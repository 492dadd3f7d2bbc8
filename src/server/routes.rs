//! HTTP API routes
//!
//! Exposes the search source to a browser map widget as JSON endpoints.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::geocode::Geocoder;
use crate::server::state::AppState;
use crate::source::resolve::SearchResult;
use crate::source::suggest::Suggestion;
use crate::source::{ResultParams, SourceConfig, SuggestParams};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router<G: Geocoder + 'static>(state: Arc<AppState<G>>) -> Router {
    Router::new()
        .route("/api/source", get(source_handler::<G>))
        .route("/api/suggestions", get(suggestions_handler::<G>))
        .route("/api/results", get(results_handler::<G>))
        .route("/api/status", get(status_handler::<G>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "INVALID_QUERY" | "INVALID_COORDINATES" | "INVALID_RADIUS" => StatusCode::BAD_REQUEST,
            "AUTH_ERROR" | "NETWORK_ERROR" | "MALFORMED_RESPONSE" | "PROVIDER_ERROR" => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError {
            code: err.code().to_string(),
            error: err.to_string(),
        }
    }
}

/// Search source settings
///
/// GET /api/source
async fn source_handler<G: Geocoder>(State(state): State<Arc<AppState<G>>>) -> Json<SourceConfig> {
    Json(state.source.info().clone())
}

/// Suggestion query string
#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    pub text: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default)]
    pub source_index: usize,
}

/// Suggestions for partial input
///
/// GET /api/suggestions?text=...&lat=...&lng=...&source_index=...
async fn suggestions_handler<G: Geocoder>(
    State(state): State<Arc<AppState<G>>>,
    Query(query): Query<SuggestionsQuery>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    let center = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
        (None, None) => state.default_center,
        _ => {
            return Err(Error::InvalidCoordinates("lat and lng must be given together".to_string()).into())
        }
    };

    let params = SuggestParams {
        partial_text: query.text,
        source_index: query.source_index,
        center,
    };
    let suggestions = state.source.get_suggestions(&params).await?;

    Ok(Json(suggestions))
}

/// Results query string: either `text` or `lat` + `lng`
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub text: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl ResultsQuery {
    fn into_params(self) -> Result<ResultParams, Error> {
        match (self.lat, self.lng, self.text) {
            (Some(lat), Some(lng), _) => Ok(ResultParams::Location(Coordinates::new(lat, lng))),
            (None, None, Some(text)) => Ok(ResultParams::Text {
                chosen_suggestion_text: text,
            }),
            (None, None, None) => Err(Error::InvalidQuery(
                "Either text or lat/lng is required".to_string(),
            )),
            _ => Err(Error::InvalidCoordinates(
                "lat and lng must be given together".to_string(),
            )),
        }
    }
}

/// Final results for a committed query
///
/// GET /api/results?text=... or /api/results?lat=...&lng=...
async fn results_handler<G: Geocoder>(
    State(state): State<Arc<AppState<G>>>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let params = query.into_params()?;
    let results = state.source.get_results(&params).await?;
    Ok(Json(results))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub running: bool,
    pub version: String,
    pub geocoder: String,
    pub endpoint: String,
    pub suggestions_enabled: bool,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler<G: Geocoder>(State(state): State<Arc<AppState<G>>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        geocoder: state.source.geocoder().name().to_string(),
        endpoint: state.endpoint.clone(),
        suggestions_enabled: state.source.info().suggestions_enabled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geocode::opencage::fake::{spawn_provider, two_results};
    use crate::geocode::testing::{feature, RecordingGeocoder};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn create_test_state(geocoder: RecordingGeocoder) -> Arc<AppState<RecordingGeocoder>> {
        Arc::new(AppState::new(geocoder, &Config::default()))
    }

    async fn get_json<G: Geocoder + 'static, T: serde::de::DeserializeOwned>(
        state: Arc<AppState<G>>,
        uri: &str,
    ) -> (StatusCode, T) {
        let response = create_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_source_endpoint() {
        let state = create_test_state(RecordingGeocoder::returning(vec![]));
        let (status, info): (_, SourceConfig) = get_json(state, "/api/source").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(info.placeholder, "example: W10");
        assert_eq!(info.min_suggest_characters, 3);
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let state = create_test_state(RecordingGeocoder::returning(vec![]));
        let (status, body): (_, StatusResponse) = get_json(state, "/api/status").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.running);
        assert_eq!(body.geocoder, "recording");
        assert!(body.suggestions_enabled);
    }

    #[tokio::test]
    async fn test_suggestions_endpoint() {
        let state = create_test_state(RecordingGeocoder::returning(vec![
            feature("Lancaster, UK", 54.0466, -2.8007),
            feature("Lancaster University, UK", 54.0104, -2.7877),
        ]));
        let (status, suggestions): (_, Vec<Suggestion>) = get_json(
            state.clone(),
            "/api/suggestions?text=Lanc%20Uni&lat=54&lng=-2.5&source_index=1",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1].label, "Lancaster University, UK");
        assert!(suggestions.iter().all(|s| s.source_index == 1));

        let calls = state.source.geocoder().calls();
        assert_eq!(calls[0].text(), "Lanc+Uni");
        assert_eq!(calls[0].proximity(), Some(Coordinates::new(54.0, -2.5)));
    }

    #[tokio::test]
    async fn test_suggestions_default_center() {
        let state = create_test_state(RecordingGeocoder::returning(vec![]));
        let (status, _): (_, Vec<Suggestion>) =
            get_json(state.clone(), "/api/suggestions?text=Lancaster").await;

        assert_eq!(status, StatusCode::OK);
        let calls = state.source.geocoder().calls();
        assert_eq!(calls[0].proximity(), Some(Coordinates::new(54.00366, -2.547855)));
    }

    #[tokio::test]
    async fn test_suggestions_below_threshold() {
        let state = create_test_state(RecordingGeocoder::returning(vec![feature("W1", 51.5, -0.1)]));
        let (status, suggestions): (_, Vec<Suggestion>) =
            get_json(state.clone(), "/api/suggestions?text=W1").await;

        assert_eq!(status, StatusCode::OK);
        assert!(suggestions.is_empty());
        assert!(state.source.geocoder().calls().is_empty());
    }

    #[tokio::test]
    async fn test_results_by_location() {
        let state = create_test_state(RecordingGeocoder::returning(vec![feature(
            "Forest of Bowland, UK",
            54.00366,
            -2.547855,
        )]));
        let (status, results): (_, Vec<SearchResult>) =
            get_json(state.clone(), "/api/results?lat=54.0&lng=-2.5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].geometry.x, -2.547855);
        assert!(results[0].extent.width() > 0.0);

        let calls = state.source.geocoder().calls();
        assert_eq!(calls[0].text(), "54,-2.5");
    }

    #[tokio::test]
    async fn test_results_requires_input() {
        let state = create_test_state(RecordingGeocoder::returning(vec![]));
        let (status, err): (_, ApiError) = get_json(state, "/api/results").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_results_half_location() {
        let state = create_test_state(RecordingGeocoder::returning(vec![]));
        let (status, err): (_, ApiError) = get_json(state, "/api/results?lat=54.0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_provider_auth_error_is_bad_gateway() {
        let state = create_test_state(RecordingGeocoder::failing(|| {
            Error::Auth("invalid API key".into())
        }));
        let (status, err): (_, ApiError) =
            get_json(state, "/api/results?text=Lancaster").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.code, "AUTH_ERROR");
    }

    #[tokio::test]
    async fn test_end_to_end_with_provider() {
        let (endpoint, requests) = spawn_provider(200, two_results()).await;
        let mut config = Config::default();
        config.geocoder.endpoint = endpoint;
        let state = Arc::new(AppState::from_config(&config, "test-key").unwrap());

        let (status, results): (_, Vec<SearchResult>) =
            get_json(state, "/api/results?text=Lancaster%20UK").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].attributes.properties["type"], "city");

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0]["q"], "Lancaster+UK");
        assert_eq!(requests[0]["limit"], "6");
    }
}
