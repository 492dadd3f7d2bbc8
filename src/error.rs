//! Error types for opencage-search

use thiserror::Error;

/// Main error type for opencage-search operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure (DNS, connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Provider rejected the API key
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Provider answered with a body we could not interpret
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Any other non-success provider status (quota, rate limit, 5xx, ...)
    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geo error: {0}")]
    Geo(String),
}

impl Error {
    /// Short machine-readable code for the failure kind
    pub fn code(&self) -> &'static str {
        match self {
            Error::Network(_) => "NETWORK_ERROR",
            Error::Auth(_) => "AUTH_ERROR",
            Error::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Error::Provider { .. } => "PROVIDER_ERROR",
            Error::InvalidQuery(_) => "INVALID_QUERY",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidRadius(_) => "INVALID_RADIUS",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Geo(_) => "LOCATION_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for opencage-search operations
pub type Result<T> = std::result::Result<T, Error>;
