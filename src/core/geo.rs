use crate::core::constants::EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate from a GeoJSON-ordered `[lng, lat]` pair
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns the coordinate as a GeoJSON-ordered `[lng, lat]` pair
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Great-circle distance to another coordinate in kilometres
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        haversine_km(*self, *other)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<geo_types::Coord<f64>> for LatLng {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Self::from_lng_lat(coord.x, coord.y)
    }
}

/// Haversine distance between two coordinates on a sphere of radius
/// [`EARTH_RADIUS_KM`].
///
/// Inputs are not validated: a NaN component yields NaN.
pub fn haversine_km(from: LatLng, to: LatLng) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dubai() -> LatLng {
        LatLng::from_lng_lat(55.2708, 25.2048)
    }

    fn london() -> LatLng {
        LatLng::from_lng_lat(-0.1276, 51.5072)
    }

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::from_lng_lat(-74.0060, 40.7128);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert_eq!(coord.to_lng_lat(), [-74.0060, 40.7128]);
        assert!(coord.is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(haversine_km(dubai(), dubai()), 0.0);
        assert_eq!(london().distance_to(&london()), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = haversine_km(dubai(), london());
        let ba = haversine_km(london(), dubai());
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_dubai_london_distance() {
        // Roughly 5,500 km
        let distance = haversine_km(dubai(), london());
        assert!((distance - 5500.0).abs() < 50.0, "got {distance}");
    }

    #[test]
    fn test_nyc_la_distance() {
        let nyc = LatLng::new(40.7128, -74.0060);
        let la = LatLng::new(34.0522, -118.2437);
        let distance = nyc.distance_to(&la);

        // Distance should be approximately 3936 km
        assert!((distance - 3936.0).abs() < 10.0, "got {distance}");
    }

    #[test]
    fn test_nan_propagates() {
        let bad = LatLng::new(f64::NAN, 0.0);
        assert!(haversine_km(bad, london()).is_nan());
    }

    #[test]
    fn test_point_math() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a.midpoint(&b), Point::new(2.0, 3.0));
        assert_eq!(b.subtract(&a), b);
        assert_eq!(b.multiply(0.5), Point::new(2.0, 3.0));
        assert!((a.distance_to(&Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
        assert!(!Point::new(f64::INFINITY, 0.0).is_finite());
    }
}
