//! Data models for the WeatherMap application
//!
//! - Location: coordinates and the caller's resolved location
//! - Weather: the current reading for a clicked point

pub mod location;
pub mod weather;

pub use location::{Coordinate, LocationInfo};
pub use weather::{WeatherOutcome, WeatherReading};
