//! Geodesic buffers
//!
//! Approximates the region within a fixed ground distance of a point as a
//! ring of vertices on a spherical earth. Each vertex is the great-circle
//! destination from the center at an evenly spaced bearing.

use crate::constants::geo::{BUFFER_SEGMENTS, EARTH_RADIUS_METERS};
use crate::coord::{BoundingBox, Coordinates};
use crate::error::{Error, Result};

/// A closed ring around a center point
#[derive(Debug, Clone)]
pub struct GeodesicBuffer {
    pub center: Coordinates,
    pub radius_meters: f64,
    /// Ring vertices, clockwise from north. Longitudes are not wrapped.
    pub ring: Vec<Coordinates>,
}

impl GeodesicBuffer {
    /// Bounding extent of the ring
    pub fn extent(&self) -> BoundingBox {
        // The ring is never empty, but fall back to the center rather than panic
        BoundingBox::from_coordinates(&self.ring).unwrap_or(BoundingBox {
            xmin: self.center.lng,
            ymin: self.center.lat,
            xmax: self.center.lng,
            ymax: self.center.lat,
        })
    }
}

/// Build a geodesic buffer around `center`
///
/// # Arguments
/// * `center` - Center of the buffer
/// * `radius_meters` - Ground distance from the center
///
/// # Returns
/// A ring of `BUFFER_SEGMENTS` vertices
pub fn geodesic_buffer(center: Coordinates, radius_meters: f64) -> Result<GeodesicBuffer> {
    center.validate()?;
    if !radius_meters.is_finite() || radius_meters <= 0.0 {
        return Err(Error::InvalidRadius(format!(
            "Buffer radius must be positive, got {}",
            radius_meters
        )));
    }

    let ring = (0..BUFFER_SEGMENTS)
        .map(|i| {
            let bearing = 360.0 * i as f64 / BUFFER_SEGMENTS as f64;
            destination(center, bearing, radius_meters)
        })
        .collect();

    Ok(GeodesicBuffer {
        center,
        radius_meters,
        ring,
    })
}

/// Point reached by travelling `distance_meters` from `origin` along the
/// great circle with initial `bearing_deg` (clockwise from north)
pub fn destination(origin: Coordinates, bearing_deg: f64, distance_meters: f64) -> Coordinates {
    let lat1 = origin.lat.to_radians();
    let lng1 = origin.lng.to_radians();
    let bearing = bearing_deg.to_radians();
    let delta = distance_meters / EARTH_RADIUS_METERS;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
    let lng2 = lng1
        + (bearing.sin() * delta.sin() * lat1.cos())
            .atan2(delta.cos() - lat1.sin() * lat2.sin());

    Coordinates::new(lat2.to_degrees(), lng2.to_degrees())
}

/// Distance between two points in meters (Haversine formula)
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
