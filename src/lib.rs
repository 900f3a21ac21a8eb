//! `WeatherMap` - interactive world map with current weather on click
//!
//! This library provides the location lookup, the weather client, the map
//! widget and the page flow that ties them together, plus the axum router
//! that serves it.

pub mod api;
pub mod config;
pub mod error;
pub mod html;
pub mod location_resolver;
pub mod logging;
pub mod map_view;
pub mod models;
pub mod shell;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::WeatherMapConfig;
pub use error::WeatherMapError;
pub use location_resolver::{IpLocationClient, LocationProvider, resolve_location};
pub use map_view::{MapHandle, MapView, Marker};
pub use models::{Coordinate, LocationInfo, WeatherOutcome, WeatherReading};
pub use shell::{Page, PageState, build_page};
pub use weather::{OpenWeatherClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
