//! Coordinate and resolved-location models

use serde::{Deserialize, Serialize};

/// Latitude used when the caller's location cannot be resolved
pub const DEFAULT_LATITUDE: f64 = 20.0;
/// Longitude used when the caller's location cannot be resolved
pub const DEFAULT_LONGITUDE: f64 = 0.0;

/// A point on the map in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a pair of raw strings, e.g. from a query string.
    ///
    /// Only numeric parsing is applied; values that are not finite floats
    /// yield `None`.
    #[must_use]
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        let lat = latitude.trim().parse::<f64>().ok()?;
        let lon = longitude.trim().parse::<f64>().ok()?;
        (lat.is_finite() && lon.is_finite()).then(|| Self::new(lat, lon))
    }

    /// Parse a combined `"lat,lon"` string as reported by ipinfo
    #[must_use]
    pub fn parse_combined(loc: &str) -> Option<Self> {
        let (lat, lon) = loc.split_once(',')?;
        Self::parse(lat, lon)
    }

    /// Format as `"lat, lon"` with four decimals for display
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// The caller's approximate location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationInfo {
    pub coordinate: Coordinate,
    /// City name, empty when unknown
    pub city: String,
    /// Country code, empty when unknown
    pub country: String,
}

impl LocationInfo {
    #[must_use]
    pub fn new(coordinate: Coordinate, city: String, country: String) -> Self {
        Self {
            coordinate,
            city,
            country,
        }
    }

    /// Location shown when geolocation fails
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            coordinate: Coordinate::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE),
            city: String::new(),
            country: String::new(),
        }
    }

    /// `"{city}, {country}"`, kept verbatim even when both parts are empty
    #[must_use]
    pub fn place_name(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("51.5,-0.12", Some((51.5, -0.12)))]
    #[case(" 35.0 , 139.0 ", Some((35.0, 139.0)))]
    #[case("51.5", None)]
    #[case("north,west", None)]
    #[case("NaN,0", None)]
    #[case("", None)]
    fn test_parse_combined(#[case] input: &str, #[case] expected: Option<(f64, f64)>) {
        let parsed = Coordinate::parse_combined(input).map(|c| (c.latitude, c.longitude));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_fallback_location() {
        let fallback = LocationInfo::fallback();
        assert_eq!(fallback.coordinate, Coordinate::new(20.0, 0.0));
        assert!(fallback.city.is_empty());
        assert!(fallback.country.is_empty());
        assert_eq!(fallback.place_name(), ", ");
    }

    #[test]
    fn test_format_coordinates() {
        let coord = Coordinate::new(46.818_234, 8.227_456);
        assert_eq!(coord.format_coordinates(), "46.8182, 8.2275");
    }
}
