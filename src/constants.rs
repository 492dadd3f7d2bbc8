//! Centralized constants for the opencage-search crate
//!
//! Protocol and geometry constants shared between modules. Anything a user
//! may reasonably tune lives in `config` instead.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Vertices used to approximate a geodesic buffer ring
    pub const BUFFER_SEGMENTS: usize = 64;
}

/// External API endpoints
pub mod api {
    /// OpenCage forward geocoding endpoint (JSON)
    pub const OPENCAGE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Search source behaviour
pub mod search {
    /// Maximum number of candidates requested from the provider
    pub const RESULT_LIMIT: u32 = 6;

    /// Radius of the buffer framing a resolved result, in meters
    pub const BUFFER_RADIUS_METERS: f64 = 250.0;

    /// Separator substituted for whitespace in query text
    pub const QUERY_SEPARATOR: &str = "+";
}
