//! Record and value types shared across the index.
use geo::Point;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// A position on the projected plane, in meters from the top-left corner.
///
/// `y` grows southwards: the north pole side of the Mercator square is `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A dataset record that can be placed on the map.
///
/// The index never inspects a record beyond these two accessors; everything
/// else is payload for the caller.
pub trait GeoRecord {
    type Id: Clone + Eq + Hash;

    /// Identity used by clients to skip objects they already hold.
    fn id(&self) -> Self::Id;

    /// Longitude/latitude of the record, `None` when coordinates are missing.
    fn location(&self) -> Option<Point>;
}

/// A point of interest with a postal address, the shape of a typical office
/// or branch dataset.
///
/// # Examples
///
/// ```
/// use quadtile::{GeoRecord, Place};
///
/// let place = Place::new(1, 37.618916, 55.751401, "Red Square, 1");
/// let location = place.location().unwrap();
/// assert_eq!(location.x(), 37.618916);
/// assert_eq!(location.y(), 55.751401);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: u64,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub address: String,
}

impl Place {
    pub fn new(id: u64, lng: f64, lat: f64, address: impl Into<String>) -> Self {
        Self {
            id,
            lng: Some(lng),
            lat: Some(lat),
            address: address.into(),
        }
    }
}

impl GeoRecord for Place {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }

    fn location(&self) -> Option<Point> {
        Some(Point::new(self.lng?, self.lat?))
    }
}

/// Shape statistics of a quad-tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of nodes, root included
    pub node_count: usize,
    pub leaf_count: usize,
    pub internal_count: usize,
    /// Number of stored objects
    pub object_count: usize,
    /// Deepest level reached below the root
    pub depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_location() {
        let place = Place::new(7, -74.0060, 40.7128, "New York");
        assert_eq!(place.id(), 7);
        assert_eq!(place.location(), Some(Point::new(-74.0060, 40.7128)));
    }

    #[test]
    fn test_place_missing_coordinates() {
        let place: Place = serde_json::from_str(r#"{ "id": 3, "lng": 10.0 }"#).unwrap();
        assert_eq!(place.lat, None);
        assert!(place.address.is_empty());
        assert!(place.location().is_none());
    }

    #[test]
    fn test_planar_point_finite() {
        assert!(PlanarPoint::new(1.0, 2.0).is_finite());
        assert!(!PlanarPoint::new(f64::NAN, 2.0).is_finite());
        assert!(!PlanarPoint::new(1.0, f64::INFINITY).is_finite());
    }
}
