//! Coordinates and display geometry
//!
//! This module handles:
//! - Geographic coordinates and their `"lat,lon"` wire form
//! - Map-space points and bounding boxes handed to the host
//! - Geodesic buffers used to frame resolved results

pub mod buffer;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Map-space point (x = longitude, y = latitude)
    pub fn to_point(self) -> Point {
        Point { x: self.lng, y: self.lat }
    }
}

/// Formats as `"lat,lon"`, the form the provider expects for `q` and `proximity`
impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            Error::InvalidCoordinates(format!("Expected \"lat,lon\", got: {}", s))
        })?;
        let lat: f64 = lat.trim().parse().map_err(|_| {
            Error::InvalidCoordinates(format!("Invalid latitude: {}", lat))
        })?;
        let lng: f64 = lng.trim().parse().map_err(|_| {
            Error::InvalidCoordinates(format!("Invalid longitude: {}", lng))
        })?;
        let coords = Coordinates::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }
}

/// A point in map space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Longitude
    pub x: f64,
    /// Latitude
    pub y: f64,
}

/// Axis-aligned extent in map space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// Smallest box containing all coordinates, or None for an empty input
    pub fn from_coordinates<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinates>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let init = BoundingBox {
            xmin: first.lng,
            ymin: first.lat,
            xmax: first.lng,
            ymax: first.lat,
        };

        Some(iter.fold(init, |bbox, c| BoundingBox {
            xmin: bbox.xmin.min(c.lng),
            ymin: bbox.ymin.min(c.lat),
            xmax: bbox.xmax.max(c.lng),
            ymax: bbox.ymax.max(c.lat),
        }))
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Whether a point lies inside or on the edge of the box
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.xmin && point.x <= self.xmax && point.y >= self.ymin && point.y <= self.ymax
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lat_lon() {
        assert_eq!(Coordinates::new(54.0, -2.5).to_string(), "54,-2.5");
        assert_eq!(
            Coordinates::new(54.00366, -2.547855).to_string(),
            "54.00366,-2.547855"
        );
    }

    #[test]
    fn test_parse_lat_lon() {
        let coords: Coordinates = "54.00366, -2.547855".parse().unwrap();
        assert_eq!(coords, Coordinates::new(54.00366, -2.547855));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("54.0".parse::<Coordinates>().is_err());
        assert!("abc,1".parse::<Coordinates>().is_err());
        assert!("1,abc".parse::<Coordinates>().is_err());
        assert!("91,0".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(40.7128, -74.0060).validate().is_ok());
        assert!(Coordinates::new(-90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(90.1, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
    }

    #[test]
    fn test_to_point_swaps_axes() {
        let point = Coordinates::new(54.00366, -2.547855).to_point();
        assert_eq!(point.x, -2.547855);
        assert_eq!(point.y, 54.00366);
    }

    #[test]
    fn test_bounding_box() {
        let coords = [
            Coordinates::new(1.0, 2.0),
            Coordinates::new(-1.0, 5.0),
            Coordinates::new(3.0, -4.0),
        ];
        let bbox = BoundingBox::from_coordinates(&coords).unwrap();

        assert_eq!(bbox.xmin, -4.0);
        assert_eq!(bbox.xmax, 5.0);
        assert_eq!(bbox.ymin, -1.0);
        assert_eq!(bbox.ymax, 3.0);
        assert_eq!(bbox.width(), 9.0);
        assert_eq!(bbox.height(), 4.0);
        assert!(bbox.contains(Point { x: 0.0, y: 0.0 }));
        assert!(!bbox.contains(Point { x: 6.0, y: 0.0 }));
    }

    #[test]
    fn test_bounding_box_empty() {
        let coords: Vec<Coordinates> = Vec::new();
        assert!(BoundingBox::from_coordinates(&coords).is_none());
    }
}
