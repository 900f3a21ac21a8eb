//! Weather reading model and display methods

use serde::{Deserialize, Serialize};

/// Current conditions at a clicked point
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReading {
    /// Place name reported by the weather service
    pub name: String,
    /// Country code (ISO 3166-1 alpha-2), may be empty
    pub country: String,
    /// Human-readable description of weather conditions, capitalized
    pub description: String,
    /// Temperature in Celsius
    pub temperature: f64,
}

impl WeatherReading {
    /// Format temperature with unit, at the precision the API reported
    #[must_use]
    pub fn format_temperature(&self) -> String {
        if self.temperature.fract() == 0.0 {
            format!("{:.1}°C", self.temperature)
        } else {
            format!("{}°C", self.temperature)
        }
    }

    #[must_use]
    pub fn place_name(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }

    /// Popup text for the weather marker
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}, {}", self.description, self.format_temperature())
    }
}

/// Result of a weather lookup that reached the service
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherOutcome {
    Found(WeatherReading),
    /// The service answered but had no usable reading for the point
    NotFound,
}

/// Upper-case the first character and lower-case the rest
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
